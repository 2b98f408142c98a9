//! User profile as returned by `GET /api/user/profile`.

use serde::{Deserialize, Serialize};

use crate::claims::Role;

/// Profile of the authenticated user, resolved server-side from the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Directory object id of the user.
    pub user_id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role string the backend derived from the token claims.
    pub role: String,
    /// Tenant the user belongs to.
    pub tenant_id: String,
}

impl UserProfile {
    /// Maps the backend role string onto the client role enum.
    #[must_use]
    pub fn role(&self) -> Role {
        match self.role.as_str() {
            Role::SUPER_ADMIN => Role::SuperAdmin,
            Role::CUSTOMER_USER => Role::CustomerUser,
            _ => Role::Unknown,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_role_mapping() {
        let profile = UserProfile {
            user_id: "oid-1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            role: "SuperAdmin".to_string(),
            tenant_id: "tid-1".to_string(),
        };
        assert_eq!(profile.role(), Role::SuperAdmin);
    }

    #[test]
    fn test_unrecognized_role_maps_to_unknown() {
        let profile = UserProfile {
            user_id: "oid-1".to_string(),
            email: "user@example.com".to_string(),
            name: "User".to_string(),
            role: "Auditor".to_string(),
            tenant_id: "tid-1".to_string(),
        };
        assert_eq!(profile.role(), Role::Unknown);
    }
}
