//! Identity token claims and role derivation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Claim name carrying the application roles assigned to the account.
const ROLES_CLAIM: &str = "roles";

/// Key-value assertions embedded in an identity token.
///
/// Claims are kept as raw JSON values so that unknown claims survive a
/// round-trip; typed accessors cover the handful the client actually reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(BTreeMap<String, serde_json::Value>);

impl Claims {
    /// Creates an empty claims mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the raw value of a claim, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    /// Returns a claim as a string, if present and string-valued.
    #[must_use]
    pub fn string(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(serde_json::Value::as_str)
    }

    /// Sets a claim, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.0.insert(name.into(), value);
    }

    /// Returns the role names from the `roles` claim.
    ///
    /// Missing or non-array claims yield an empty list; non-string entries
    /// are skipped.
    #[must_use]
    pub fn roles(&self) -> Vec<&str> {
        self.0
            .get(ROLES_CLAIM)
            .and_then(serde_json::Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Builds a claims mapping with the given role names.
    #[must_use]
    pub fn with_roles(roles: &[&str]) -> Self {
        let mut claims = Self::new();
        claims.set(
            ROLES_CLAIM,
            serde_json::Value::Array(
                roles
                    .iter()
                    .map(|r| serde_json::Value::String((*r).to_string()))
                    .collect(),
            ),
        );
        claims
    }

    /// Returns the number of claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no claims are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Application role derived from token claims.
///
/// Role is always recomputed from the current claims; it is never stored
/// independently of the session that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator: admin dashboard, user directory, analytics.
    SuperAdmin,
    /// Regular customer: proposal dashboard only.
    CustomerUser,
    /// No recognized role claim. Treated as a customer for routing.
    #[default]
    Unknown,
}

impl Role {
    /// Role name as it appears in the `roles` claim.
    pub const SUPER_ADMIN: &'static str = "SuperAdmin";
    /// Role name as it appears in the `roles` claim.
    pub const CUSTOMER_USER: &'static str = "CustomerUser";

    /// Derives the role from token claims.
    ///
    /// Admin wins when both roles are assigned. This is a pure function:
    /// calling it repeatedly with unchanged claims returns the same value.
    #[must_use]
    pub fn from_claims(claims: &Claims) -> Self {
        let roles = claims.roles();
        if roles.contains(&Self::SUPER_ADMIN) {
            Self::SuperAdmin
        } else if roles.contains(&Self::CUSTOMER_USER) {
            Self::CustomerUser
        } else {
            Self::Unknown
        }
    }

    /// Returns true for the administrator role.
    #[must_use]
    pub const fn is_super_admin(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// Whether an account holding `self` satisfies a gate requiring `required`.
    ///
    /// `Unknown` satisfies nothing; no role requirement is satisfied by
    /// every role.
    #[must_use]
    pub fn satisfies(self, required: Option<Self>) -> bool {
        required.is_none_or(|r| self == r)
    }

    /// Short display label for badges and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SuperAdmin",
            Self::CustomerUser => "Customer User",
            Self::Unknown => "Unassigned",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_claim_extraction() {
        let claims = Claims::with_roles(&["SuperAdmin", "CustomerUser"]);
        assert_eq!(claims.roles(), vec!["SuperAdmin", "CustomerUser"]);
    }

    #[test]
    fn test_missing_roles_claim_is_empty() {
        let claims = Claims::new();
        assert!(claims.roles().is_empty());
    }

    #[test]
    fn test_non_array_roles_claim_is_empty() {
        let mut claims = Claims::new();
        claims.set("roles", serde_json::Value::String("SuperAdmin".into()));
        assert!(claims.roles().is_empty());
    }

    #[test]
    fn test_role_derivation() {
        assert_eq!(
            Role::from_claims(&Claims::with_roles(&["SuperAdmin"])),
            Role::SuperAdmin
        );
        assert_eq!(
            Role::from_claims(&Claims::with_roles(&["CustomerUser"])),
            Role::CustomerUser
        );
        assert_eq!(Role::from_claims(&Claims::with_roles(&[])), Role::Unknown);
    }

    #[test]
    fn test_role_derivation_admin_wins() {
        let claims = Claims::with_roles(&["CustomerUser", "SuperAdmin"]);
        assert_eq!(Role::from_claims(&claims), Role::SuperAdmin);
    }

    #[test]
    fn test_role_derivation_is_idempotent() {
        let claims = Claims::with_roles(&["SuperAdmin"]);
        let first = Role::from_claims(&claims);
        for _ in 0..10 {
            assert_eq!(Role::from_claims(&claims), first);
        }
    }

    #[test]
    fn test_role_satisfies() {
        assert!(Role::SuperAdmin.satisfies(Some(Role::SuperAdmin)));
        assert!(Role::CustomerUser.satisfies(None));
        assert!(!Role::Unknown.satisfies(Some(Role::CustomerUser)));
        assert!(!Role::CustomerUser.satisfies(Some(Role::SuperAdmin)));
    }
}
