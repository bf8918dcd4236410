use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::ErrorResponse;
use crate::AuthError;

/// converts `AuthError` into appropriate HTTP responses
#[derive(Debug)]
pub struct AppError(pub AuthError);

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_response = ErrorResponse::from(self.0.clone());
        let status = match &self.0 {
            AuthError::InvalidCredentials
            | AuthError::AccountBlocked
            | AuthError::TokenExpired
            | AuthError::TokenInvalid
            | AuthError::BearerToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::PasswordHashError
            | AuthError::ConfigurationError(_)
            | AuthError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(error_response)).into_response()
    }
}
