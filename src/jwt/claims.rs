use serde::{Deserialize, Serialize};

/// Claims embedded in a book market token.
///
/// Exactly one of access/refresh semantics applies per token, signaled by
/// `isRefresh`: access tokens carry `roles`, refresh tokens do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer - fixed for every token minted by this system.
    pub iss: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Subject - the user ID.
    pub id: i64,
    /// Role names without the internal prefix. Access tokens only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Distinguishes refresh tokens from access tokens.
    #[serde(rename = "isRefresh")]
    pub is_refresh: bool,
}

impl TokenClaims {
    /// Returns true if this token is expired at `now` (Unix seconds).
    ///
    /// A token is still valid at the exact expiration second.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let claims = TokenClaims {
            iss: "Book Market".to_owned(),
            exp: 1_000,
            id: 1,
            roles: None,
            is_refresh: true,
        };

        assert!(!claims.is_expired_at(999));
        assert!(!claims.is_expired_at(1_000));
        assert!(claims.is_expired_at(1_001));
    }

    #[test]
    fn test_roles_claim_is_omitted_when_absent() {
        let claims = TokenClaims {
            iss: "Book Market".to_owned(),
            exp: 1_000,
            id: 42,
            roles: None,
            is_refresh: true,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("roles").is_none());
        assert_eq!(json["isRefresh"], true);
    }

    #[test]
    fn test_claims_round_trip() {
        let claims = TokenClaims {
            iss: "Book Market".to_owned(),
            exp: 1_000,
            id: 42,
            roles: Some(vec!["USER".to_owned(), "ADMIN".to_owned()]),
            is_refresh: false,
        };

        let json = serde_json::to_string(&claims).unwrap();
        let parsed: TokenClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, claims);
    }
}
