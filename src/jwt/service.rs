use std::collections::HashMap;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;

use super::{JwtConfig, TokenClaims};
use crate::principal::AuthenticatedUser;
use crate::AuthError;

/// Issuer claim stamped into every token minted by this service.
pub const ISSUER: &str = "Book Market";

/// Placeholder credential for principals rebuilt from token claims.
const PROTECTED_PASSWORD: &str = "[PROTECTED]";

/// The sole authority for minting and validating tokens.
///
/// Hides the signing secret from all callers. Operations are pure aside from
/// reading the wall clock, so a single instance can be shared freely across
/// request handlers.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Creates a new token service with the given configuration.
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.expose_secret().as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());

        // Expiry is enforced in validate_token only, so claim reads stay
        // tolerant of expired-but-correctly-signed tokens.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Mints a short-lived access token for the given principal.
    ///
    /// The `roles` claim carries the principal's authorities with the
    /// internal prefix stripped.
    pub fn generate_access_token(
        &self,
        principal: &AuthenticatedUser,
    ) -> Result<String, AuthError> {
        let expiration = Utc::now() + self.config.access_expiry;
        let claims = TokenClaims {
            iss: ISSUER.to_owned(),
            exp: expiration.timestamp(),
            id: principal.id(),
            roles: Some(principal.role_names()),
            is_refresh: false,
        };

        self.encode(&claims)
    }

    /// Mints a long-lived refresh token for the given principal.
    ///
    /// Refresh tokens carry no roles claim and cannot be turned into a
    /// principal; they only drive the refresh flow.
    pub fn generate_refresh_token(
        &self,
        principal: &AuthenticatedUser,
    ) -> Result<String, AuthError> {
        let expiration = Utc::now() + self.config.refresh_expiry;
        let claims = TokenClaims {
            iss: ISSUER.to_owned(),
            exp: expiration.timestamp(),
            id: principal.id(),
            roles: None,
            is_refresh: true,
        };

        self.encode(&claims)
    }

    /// Returns true iff the token has a valid signature, is not expired, and
    /// carries the expected issuer. Never errors.
    pub fn validate_token(&self, token: &str) -> bool {
        match self.claims(token) {
            Ok(claims) => claims.iss == ISSUER && !claims.is_expired_at(Utc::now().timestamp()),
            Err(_) => false,
        }
    }

    /// Extracts the claims from a token.
    ///
    /// Succeeds for an expired token as long as the signature checks out,
    /// which is what the refresh flow relies on.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BearerToken` for malformed, unsigned or mis-keyed
    /// input.
    pub fn claims(&self, token: &str) -> Result<TokenClaims, AuthError> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::BearerToken(e.to_string()))
    }

    /// Typed projection of a single claim, with the same expiry tolerance as
    /// [`claims`](Self::claims).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BearerToken` if the token cannot be parsed, the
    /// claim is absent, or the claim does not deserialize as `T`.
    pub fn claim<T: DeserializeOwned>(&self, token: &str, name: &str) -> Result<T, AuthError> {
        let claims = jsonwebtoken::decode::<HashMap<String, serde_json::Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )
        .map_err(|e| AuthError::BearerToken(e.to_string()))?
        .claims;

        let value = claims
            .get(name)
            .cloned()
            .ok_or_else(|| AuthError::BearerToken(format!("claim {name} is missing from token")))?;

        serde_json::from_value(value)
            .map_err(|_| AuthError::BearerToken(format!("claim {name} has an unexpected type")))
    }

    /// Reconstructs the authenticated principal from an access token.
    ///
    /// Expiry-tolerant: an expired-but-correctly-signed access token still
    /// yields a principal, which is exactly what the refresh flow needs.
    /// Refresh tokens are structurally valid but semantically forbidden here
    /// and are rejected outright.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BearerToken` if the token cannot be parsed, is a
    /// refresh token, or lacks the subject/roles claims.
    pub fn build_authentication(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.claims(token)?;

        if claims.is_refresh {
            return Err(AuthError::BearerToken(
                "an authentication cannot be built from a refresh token".to_owned(),
            ));
        }

        let roles = claims
            .roles
            .filter(|roles| !roles.is_empty())
            .ok_or_else(|| {
                AuthError::BearerToken("required claims are missing from the token".to_owned())
            })?;

        Ok(AuthenticatedUser::new(
            claims.id,
            claims.id.to_string(),
            PROTECTED_PASSWORD,
            roles,
        ))
    }

    fn encode(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const TEST_SECRET: &str = "test-secret-32-bytes-long-key-00";

    fn create_service() -> JwtService {
        let config = JwtConfig::new(TEST_SECRET)
            .unwrap()
            .with_access_expiry(Duration::minutes(10))
            .with_refresh_expiry(Duration::minutes(360));
        JwtService::new(config)
    }

    fn create_principal() -> AuthenticatedUser {
        AuthenticatedUser::new(999, "TestUser", "pass", ["USER", "ADMIN"])
    }

    /// Signs arbitrary claims with the test secret, bypassing the service.
    fn sign_claims(claims: &TokenClaims) -> String {
        let key = EncodingKey::from_secret(TEST_SECRET.as_bytes());
        jsonwebtoken::encode(&Header::default(), claims, &key).unwrap()
    }

    fn expired_access_claims() -> TokenClaims {
        TokenClaims {
            iss: ISSUER.to_owned(),
            exp: Utc::now().timestamp() - 3600,
            id: 999,
            roles: Some(vec!["USER".to_owned(), "ADMIN".to_owned()]),
            is_refresh: false,
        }
    }

    #[test]
    fn test_generate_access_token() {
        let service = create_service();
        let before = Utc::now().timestamp();

        let token = service.generate_access_token(&create_principal()).unwrap();

        assert!(service.validate_token(&token));
        let claims = service.claims(&token).unwrap();
        assert_eq!(claims.iss, "Book Market");
        assert_eq!(claims.id, 999);
        assert!(!claims.is_refresh);

        let roles = claims.roles.unwrap();
        assert_eq!(roles.len(), 2);
        assert!(roles.contains(&"USER".to_owned()));
        assert!(roles.contains(&"ADMIN".to_owned()));

        // expiration is ten minutes out
        let expected = before + Duration::minutes(10).num_seconds();
        assert!((claims.exp - expected).abs() <= 1);
    }

    #[test]
    fn test_generate_refresh_token() {
        let service = create_service();
        let before = Utc::now().timestamp();

        let token = service.generate_refresh_token(&create_principal()).unwrap();

        assert!(service.validate_token(&token));
        let claims = service.claims(&token).unwrap();
        assert_eq!(claims.iss, "Book Market");
        assert_eq!(claims.id, 999);
        assert!(claims.is_refresh);
        assert!(claims.roles.is_none());

        let expected = before + Duration::minutes(360).num_seconds();
        assert!((claims.exp - expected).abs() <= 1);
    }

    #[test]
    fn test_validate_expired_token() {
        let service = create_service();
        let token = sign_claims(&expired_access_claims());

        assert!(!service.validate_token(&token));
    }

    #[test]
    fn test_validate_garbage_token() {
        let service = create_service();

        assert!(!service.validate_token(""));
        assert!(!service.validate_token("not-a-token"));
        assert!(!service.validate_token("a.b.c"));
    }

    #[test]
    fn test_validate_wrong_issuer() {
        let service = create_service();
        let mut claims = expired_access_claims();
        claims.iss = "Someone Else".to_owned();
        claims.exp = Utc::now().timestamp() + 600;
        let token = sign_claims(&claims);

        assert!(!service.validate_token(&token));
        // issuer only gates validation, not claim reads
        assert!(service.claims(&token).is_ok());
    }

    #[test]
    fn test_validate_wrong_secret() {
        let service = create_service();
        let other =
            JwtService::new(JwtConfig::new("test-secret-32-bytes-long-key-99").unwrap());

        let token = other.generate_access_token(&create_principal()).unwrap();

        assert!(!service.validate_token(&token));
        assert!(matches!(
            service.claims(&token),
            Err(AuthError::BearerToken(_))
        ));
    }

    #[test]
    fn test_claims_tolerate_expiry() {
        let service = create_service();
        let token = sign_claims(&expired_access_claims());

        // claims stay readable after expiry, validation does not
        let claims = service.claims(&token).unwrap();
        assert_eq!(claims.id, 999);
        assert!(!service.validate_token(&token));

        // and repeated reads agree
        assert_eq!(service.claims(&token).unwrap(), claims);
    }

    #[test]
    fn test_claims_reject_malformed_token() {
        let service = create_service();

        assert!(matches!(
            service.claims("not-a-token"),
            Err(AuthError::BearerToken(_))
        ));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = create_service();
        let token = service.generate_access_token(&create_principal()).unwrap();

        // flip a character in the payload segment
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(!service.validate_token(&tampered));
        assert!(service.claims(&tampered).is_err());
    }

    #[test]
    fn test_single_claim_projection() {
        let service = create_service();
        let token = service.generate_access_token(&create_principal()).unwrap();

        assert_eq!(service.claim::<i64>(&token, "id").unwrap(), 999);
        assert_eq!(
            service.claim::<String>(&token, "iss").unwrap(),
            "Book Market"
        );
        assert!(!service.claim::<bool>(&token, "isRefresh").unwrap());

        let roles = service.claim::<Vec<String>>(&token, "roles").unwrap();
        assert!(roles.contains(&"USER".to_owned()));
    }

    #[test]
    fn test_single_claim_missing() {
        let service = create_service();
        let token = service.generate_refresh_token(&create_principal()).unwrap();

        // refresh tokens carry no roles claim
        let result = service.claim::<Vec<String>>(&token, "roles");
        assert!(matches!(result, Err(AuthError::BearerToken(_))));
    }

    #[test]
    fn test_single_claim_wrong_type() {
        let service = create_service();
        let token = service.generate_access_token(&create_principal()).unwrap();

        let result = service.claim::<Vec<String>>(&token, "id");
        assert!(matches!(result, Err(AuthError::BearerToken(_))));
    }

    #[test]
    fn test_build_authentication_from_access_token() {
        let service = create_service();
        let token = service.generate_access_token(&create_principal()).unwrap();

        let principal = service.build_authentication(&token).unwrap();

        assert_eq!(principal.id(), 999);
        assert_eq!(principal.username(), "999");
        assert_eq!(
            principal.password().unwrap().expose_secret(),
            "[PROTECTED]"
        );
        assert_eq!(principal.authorities().len(), 2);
        assert!(principal.authorities().contains("ROLE_USER"));
        assert!(principal.authorities().contains("ROLE_ADMIN"));
    }

    #[test]
    fn test_build_authentication_rejects_refresh_token() {
        let service = create_service();
        let token = service.generate_refresh_token(&create_principal()).unwrap();

        let result = service.build_authentication(&token);
        assert!(matches!(result, Err(AuthError::BearerToken(_))));
    }

    #[test]
    fn test_build_authentication_tolerates_expired_access_token() {
        let service = create_service();
        let token = sign_claims(&expired_access_claims());

        let principal = service.build_authentication(&token).unwrap();
        assert_eq!(principal.id(), 999);
    }

    #[test]
    fn test_build_authentication_requires_roles() {
        let service = create_service();
        let claims = TokenClaims {
            roles: Some(Vec::new()),
            exp: Utc::now().timestamp() + 600,
            ..expired_access_claims()
        };
        let token = sign_claims(&claims);

        let result = service.build_authentication(&token);
        assert!(matches!(result, Err(AuthError::BearerToken(_))));
    }
}
