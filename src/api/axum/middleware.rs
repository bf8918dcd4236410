use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::error::AppError;
use super::routes::AppState;
use crate::principal::AuthenticatedUser;
use crate::AuthError;

/// The principal attached to the current request by [`authenticate`].
///
/// Use it as an extractor on routes that require authentication; requests
/// without an attached principal are rejected with 401. Use
/// `Option<CurrentUser>` on routes that also serve anonymous callers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

impl CurrentUser {
    pub fn into_inner(self) -> AuthenticatedUser {
        self.0
    }

    pub fn user(&self) -> &AuthenticatedUser {
        &self.0
    }
}

/// Pulls the token out of the `Authorization` header, stripping the scheme
/// prefix. Returns `None` if the header is absent or the prefix does not
/// match.
pub fn extract_bearer_token(headers: &HeaderMap, prefix: &str) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .and_then(|auth| auth.strip_prefix(prefix))
        .map(ToOwned::to_owned)
}

/// Per-request authentication middleware.
///
/// An absent header or a token that fails validation (bad signature,
/// expired, wrong issuer) passes through unauthenticated - public routes
/// must keep working, and protected routes reject missing principals later.
/// A token that validates but cannot produce a principal - a refresh token
/// in the bearer slot - is misuse and is rejected with 401 on the spot.
pub async fn authenticate<U>(
    State(state): State<AppState<U>>,
    mut request: Request,
    next: Next,
) -> Response
where
    U: Clone + Send + Sync + 'static,
{
    if let Some(token) = extract_bearer_token(request.headers(), &state.security.bearer_prefix) {
        if state.jwt_service.validate_token(&token) {
            match state.jwt_service.build_authentication(&token) {
                Ok(principal) => {
                    request.extensions_mut().insert(CurrentUser(principal));
                }
                Err(err) => return AppError(err).into_response(),
            }
        }
    }

    next.run(request).await
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError(AuthError::TokenInvalid))
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<CurrentUser>().cloned())
    }
}
