//! Site-wide application settings (single row).

use crate::error::CoreError;

/// Primary key of the one and only `app_configuration` row.
pub const APP_CONFIG_ID: i16 = 1;

/// Application name used until an administrator sets one.
pub const DEFAULT_APP_NAME: &str = "Portal Sandoval";

pub const MAX_APP_NAME_LEN: usize = 100;
pub const MAX_FAVICON_URL_LEN: usize = 500;

/// Validate an application name supplied on update.
pub fn validate_app_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("app_name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_APP_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "app_name must be at most {MAX_APP_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a favicon location. The value is stored as an opaque path or
/// URL; only its length is constrained.
pub fn validate_favicon_url(url: &str) -> Result<(), CoreError> {
    if url.len() > MAX_FAVICON_URL_LEN {
        return Err(CoreError::Validation(format!(
            "favicon_url must be at most {MAX_FAVICON_URL_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_is_valid() {
        assert!(validate_app_name(DEFAULT_APP_NAME).is_ok());
    }

    #[test]
    fn blank_or_long_names_rejected() {
        assert!(validate_app_name("   ").is_err());
        assert!(validate_app_name(&"x".repeat(MAX_APP_NAME_LEN + 1)).is_err());
        assert!(validate_app_name(&"x".repeat(MAX_APP_NAME_LEN)).is_ok());
    }

    #[test]
    fn favicon_path_is_opaque() {
        assert!(validate_favicon_url("favicons/site.ico").is_ok());
        assert!(validate_favicon_url("").is_ok());
        assert!(validate_favicon_url(&"a".repeat(MAX_FAVICON_URL_LEN + 1)).is_err());
    }
}
