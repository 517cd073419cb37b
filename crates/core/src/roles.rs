//! Well-known role name constants.
//!
//! Roles are derived from `users.is_admin` and embedded in access-token claims.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Resolve the role name carried in tokens for a user row.
pub fn role_for(is_admin: bool) -> &'static str {
    if is_admin {
        ROLE_ADMIN
    } else {
        ROLE_USER
    }
}
