//! Input validation for client, project and task writes.
//!
//! Handlers call these before touching the store; every failure is a
//! [`CoreError::Validation`] and maps to `400 VALIDATION_ERROR`.

use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;
use crate::types::Money;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_USERNAME_LEN: usize = 150;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PHONE_LEN: usize = 50;

/// Largest amount a `NUMERIC(10,2)` column accepts.
pub fn max_money() -> Money {
    Money::new(99_999_999_99, 2)
}

/// A required free-text field: non-blank and at most [`MAX_NAME_LEN`] chars.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() || username.len() > MAX_USERNAME_LEN {
        return Err(CoreError::Validation(format!(
            "username must be between 1 and {MAX_USERNAME_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@' | '+'))
    {
        return Err(CoreError::Validation(
            "username may only contain letters, digits and . _ - @ +".into(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!("Invalid email '{email}'")));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if phone.len() > MAX_PHONE_LEN {
        return Err(CoreError::Validation(format!(
            "phone must be at most {MAX_PHONE_LEN} characters"
        )));
    }
    Ok(())
}

/// External video links must be absolute URLs.
pub fn validate_video_url(field: &str, url: &str) -> Result<(), CoreError> {
    if !url.validate_url() {
        return Err(CoreError::Validation(format!("{field} must be a valid URL")));
    }
    Ok(())
}

/// Costs are optional; when present they must be non-negative and fit the
/// store's precision.
pub fn validate_cost(field: &str, cost: Option<Money>) -> Result<(), CoreError> {
    let Some(cost) = cost else {
        return Ok(());
    };
    if cost.is_sign_negative() && !cost.is_zero() {
        return Err(CoreError::Validation(format!("{field} must not be negative")));
    }
    if cost.round_dp(2) != cost {
        return Err(CoreError::Validation(format!(
            "{field} must have at most 2 decimal places"
        )));
    }
    if cost > max_money() {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {}",
            max_money()
        )));
    }
    Ok(())
}
