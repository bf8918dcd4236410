use chrono::Utc;

use crate::events::{dispatch, AuthEvent};
use crate::jwt::JwtService;
use crate::AuthError;

/// Access-token refresh.
///
/// Requires a live refresh token plus the previous access token. The old
/// access token may be expired - that is the point of refreshing - but its
/// signature and claims must check out, proving the caller once held a
/// matching access token. A brand-new access token is minted from the
/// reconstructed principal; the refresh token itself is never renewed.
pub struct RefreshTokenAction {
    jwt_service: JwtService,
}

impl RefreshTokenAction {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }

    /// Exchanges the token pair for a fresh access token.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "refresh_token", skip_all, err)
    )]
    pub async fn execute(
        &self,
        refresh_token: &str,
        access_token: &str,
    ) -> Result<String, AuthError> {
        if !self.jwt_service.validate_token(refresh_token) {
            return Err(AuthError::BearerToken(
                "refresh token is invalid or expired".to_owned(),
            ));
        }

        // expiry-tolerant: only the signature and claims of the old access
        // token are checked here
        let principal = self.jwt_service.build_authentication(access_token)?;
        let new_access_token = self.jwt_service.generate_access_token(&principal)?;

        dispatch(AuthEvent::TokenRefreshed {
            user_id: principal.id(),
            at: Utc::now(),
        })
        .await;

        Ok(new_access_token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};

    use super::*;
    use crate::jwt::{JwtConfig, TokenClaims, ISSUER};
    use crate::principal::AuthenticatedUser;

    const TEST_SECRET: &str = "test-secret-32-bytes-long-key-30";

    fn create_jwt_service() -> JwtService {
        let config = JwtConfig::new(TEST_SECRET)
            .unwrap()
            .with_access_expiry(Duration::minutes(10))
            .with_refresh_expiry(Duration::minutes(360));
        JwtService::new(config)
    }

    fn create_principal() -> AuthenticatedUser {
        AuthenticatedUser::new(7, "reader", "pass", ["USER"])
    }

    fn expired_access_token() -> String {
        let claims = TokenClaims {
            iss: ISSUER.to_owned(),
            exp: Utc::now().timestamp() - 3600,
            id: 7,
            roles: Some(vec!["USER".to_owned()]),
            is_refresh: false,
        };
        let key = EncodingKey::from_secret(TEST_SECRET.as_bytes());
        jsonwebtoken::encode(&Header::default(), &claims, &key).unwrap()
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let jwt_service = create_jwt_service();
        let principal = create_principal();

        let access = jwt_service.generate_access_token(&principal).unwrap();
        let refresh = jwt_service.generate_refresh_token(&principal).unwrap();

        let action = RefreshTokenAction::new(jwt_service.clone());
        let new_access = action.execute(&refresh, &access).await.unwrap();

        assert!(jwt_service.validate_token(&new_access));
        let claims = jwt_service.claims(&new_access).unwrap();
        assert_eq!(claims.id, 7);
        assert!(!claims.is_refresh);
    }

    #[tokio::test]
    async fn test_refresh_with_expired_access_token() {
        let jwt_service = create_jwt_service();
        let refresh = jwt_service
            .generate_refresh_token(&create_principal())
            .unwrap();

        let action = RefreshTokenAction::new(jwt_service.clone());
        let new_access = action
            .execute(&refresh, &expired_access_token())
            .await
            .unwrap();

        assert!(jwt_service.validate_token(&new_access));
    }

    #[tokio::test]
    async fn test_refresh_with_invalid_refresh_token() {
        let jwt_service = create_jwt_service();
        let access = jwt_service
            .generate_access_token(&create_principal())
            .unwrap();

        let action = RefreshTokenAction::new(jwt_service);
        let result = action.execute("INVALID_TOKEN", &access).await;

        assert!(matches!(result, Err(AuthError::BearerToken(_))));
    }

    #[tokio::test]
    async fn test_refresh_with_invalid_access_token() {
        let jwt_service = create_jwt_service();
        let refresh = jwt_service
            .generate_refresh_token(&create_principal())
            .unwrap();

        let action = RefreshTokenAction::new(jwt_service);
        let result = action.execute(&refresh, "INVALID_TOKEN").await;

        assert!(matches!(result, Err(AuthError::BearerToken(_))));
    }

    #[tokio::test]
    async fn test_refresh_token_in_access_slot_is_rejected() {
        let jwt_service = create_jwt_service();
        let refresh = jwt_service
            .generate_refresh_token(&create_principal())
            .unwrap();

        let action = RefreshTokenAction::new(jwt_service);
        let result = action.execute(&refresh, &refresh).await;

        assert!(matches!(result, Err(AuthError::BearerToken(_))));
    }
}
