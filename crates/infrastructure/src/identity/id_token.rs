//! Identity-token payload decoding.
//!
//! Only the payload segment is read. Signatures are not verified here; the
//! backend validates every token it receives, and the client uses claims
//! solely for display and routing convenience.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use prospect_domain::{Account, AccountId, AuthError, Claims};

/// Decodes the claims from a compact JWS identity token.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` when the token is not three
/// dot-separated segments or the payload is not base64url JSON.
pub fn decode_claims(id_token: &str) -> Result<Claims, AuthError> {
    let payload = id_token
        .split('.')
        .nth(1)
        .ok_or_else(|| invalid("identity token is not in compact JWS form"))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| invalid(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes).map_err(|e| invalid(format!("payload is not JSON: {e}")))
}

/// Materializes an account from decoded identity-token claims.
///
/// The account id prefers the directory object id (`oid`) and falls back to
/// the token subject. The sign-in name prefers `preferred_username`, then
/// `upn`, then `email`.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` when neither `oid` nor `sub` is present.
pub fn account_from_claims(claims: Claims) -> Result<Account, AuthError> {
    let id = claims
        .string("oid")
        .or_else(|| claims.string("sub"))
        .ok_or_else(|| invalid("identity token has neither oid nor sub"))?
        .to_string();

    let username = claims
        .string("preferred_username")
        .or_else(|| claims.string("upn"))
        .or_else(|| claims.string("email"))
        .unwrap_or_default()
        .to_string();

    let display_name = claims
        .string("name")
        .map_or_else(|| username.clone(), String::from);

    Ok(Account::new(AccountId::new(id), username, display_name, claims))
}

fn invalid(message: impl Into<String>) -> AuthError {
    AuthError::InvalidToken {
        message: message.into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prospect_domain::Role;

    fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_decode_roundtrip() {
        let token = token_with_payload(&serde_json::json!({
            "oid": "oid-123",
            "preferred_username": "admin@example.com",
            "name": "Admin Example",
            "roles": ["SuperAdmin"],
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.string("oid"), Some("oid-123"));
        assert_eq!(Role::from_claims(&claims), Role::SuperAdmin);

        let account = account_from_claims(claims).unwrap();
        assert_eq!(account.id.as_str(), "oid-123");
        assert_eq!(account.username, "admin@example.com");
        assert_eq!(account.display_name, "Admin Example");
    }

    #[test]
    fn test_account_falls_back_to_sub() {
        let claims = decode_claims(&token_with_payload(&serde_json::json!({
            "sub": "subject-1",
            "email": "user@example.com",
        })))
        .unwrap();

        let account = account_from_claims(claims).unwrap();
        assert_eq!(account.id.as_str(), "subject-1");
        assert_eq!(account.username, "user@example.com");
        // No name claim: display name falls back to the sign-in name.
        assert_eq!(account.display_name, "user@example.com");
    }

    #[test]
    fn test_missing_subject_is_invalid() {
        let claims = decode_claims(&token_with_payload(&serde_json::json!({
            "name": "No Subject",
        })))
        .unwrap();
        assert!(matches!(
            account_from_claims(claims),
            Err(AuthError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        assert!(matches!(
            decode_claims("not-a-jwt"),
            Err(AuthError::InvalidToken { .. })
        ));
        assert!(matches!(
            decode_claims("a.!!!.c"),
            Err(AuthError::InvalidToken { .. })
        ));
    }
}
