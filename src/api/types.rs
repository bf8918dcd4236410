use serde::{Deserialize, Serialize};

use crate::actions::LoginOutcome;
use crate::AuthError;

// Request DTOs

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Response DTOs

/// Body returned by a successful login.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: i64,
    /// Role names without the internal prefix.
    pub roles: Vec<String>,
    pub access_token: String,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("user_id", &self.user_id)
            .field("roles", &self.roles)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        LoginResponse {
            user_id: outcome.user.id(),
            roles: outcome.user.role_names(),
            access_token: outcome.access_token,
        }
    }
}

/// Body returned by a successful token refresh.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

impl std::fmt::Debug for RefreshResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshResponse")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AccountBlocked => "ACCOUNT_BLOCKED",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::TokenInvalid => "TOKEN_INVALID",
            AuthError::BearerToken(_) => "BEARER_TOKEN_REJECTED",
            AuthError::PasswordHashError => "PASSWORD_HASH_ERROR",
            AuthError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            AuthError::StoreError(_) => "STORE_ERROR",
        };

        ErrorResponse {
            error: err.to_string(),
            code: code.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_codes() {
        let response = ErrorResponse::from(AuthError::InvalidCredentials);
        assert_eq!(response.code, "INVALID_CREDENTIALS");
        assert_eq!(response.error, "Bad credentials");

        let response =
            ErrorResponse::from(AuthError::BearerToken("bearer token is missing".to_owned()));
        assert_eq!(response.code, "BEARER_TOKEN_REJECTED");
        assert_eq!(response.error, "bearer token is missing");
    }

    #[test]
    fn test_login_response_uses_camel_case() {
        let response = LoginResponse {
            user_id: 7,
            roles: vec!["USER".to_owned()],
            access_token: "token".to_owned(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["roles"][0], "USER");
        assert_eq!(json["accessToken"], "token");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let response = RefreshResponse {
            access_token: "supersecret".to_owned(),
        };
        let debug = format!("{response:?}");

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("supersecret"));
    }
}
