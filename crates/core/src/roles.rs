//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20250101000001_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
pub const ROLE_REVIEWER: &str = "reviewer";

/// All assignable roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER, ROLE_REVIEWER];

/// Validate that a role name is one of [`VALID_ROLES`].
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_accepted() {
        for role in VALID_ROLES {
            assert!(validate_role(role).is_ok());
        }
    }

    #[test]
    fn unknown_role_rejected() {
        let err = validate_role("creator").unwrap_err();
        assert!(err.contains("Invalid role 'creator'"));
    }
}
