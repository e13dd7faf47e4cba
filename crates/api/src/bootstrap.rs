//! Startup seeding of the first administrator account.

use bizdesk_core::roles::ROLE_ADMIN;
use bizdesk_core::validation::{validate_email, validate_password, validate_username};
use bizdesk_db::models::user::CreateUser;
use bizdesk_db::repositories::UserRepo;
use bizdesk_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the administrator account unless a user with that username
/// already exists. Returns `true` when an account was created.
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, &admin.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %admin.username, "Bootstrap admin already present");
        return Ok(false);
    }

    validate_username(&admin.username)?;
    validate_email(&admin.email)?;
    validate_password(&admin.password)?;

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
