//! Session and account types.

use serde::{Deserialize, Serialize};

use crate::claims::{Claims, Role};

/// Stable identifier for an identity-provider account.
///
/// For Entra-style providers this is the object id of the directory user,
/// optionally qualified by tenant. Treated as opaque text by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an account id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A signed-in identity-provider account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable account identifier.
    pub id: AccountId,
    /// Sign-in name, usually an email address.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Claims from the account's identity token.
    pub claims: Claims,
}

impl Account {
    /// Creates an account with the given identity and claims.
    #[must_use]
    pub fn new(
        id: AccountId,
        username: impl Into<String>,
        display_name: impl Into<String>,
        claims: Claims,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
            claims,
        }
    }
}

/// Snapshot of the authentication state handed to routing and data fetching.
///
/// A session is immutable once taken; readers never observe a partial
/// transition. The role is recomputed from claims on every call rather than
/// stored, so a stale role can never outlive a session change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    account: Option<Account>,
}

impl Session {
    /// Session with no signed-in account.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { account: None }
    }

    /// Session for a signed-in account.
    #[must_use]
    pub const fn authenticated(account: Account) -> Self {
        Self {
            account: Some(account),
        }
    }

    /// Returns true if an account is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    /// Returns the signed-in account, if any.
    #[must_use]
    pub const fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Derives the role from the current account's claims.
    ///
    /// Anonymous sessions have no recognized role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.account
            .as_ref()
            .map_or(Role::Unknown, |a| Role::from_claims(&a.claims))
    }
}
