//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the initial migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIENT: &str = "client";

/// All assignable roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CLIENT];
