use axum::routing::post;
use axum::Router;

use super::handlers;
use crate::config::SecurityConfig;
use crate::jwt::JwtService;
use crate::repository::UserRepository;

/// Shared state for the authentication routes and middleware.
#[derive(Clone)]
pub struct AppState<U> {
    pub user_repo: U,
    pub jwt_service: JwtService,
    pub security: SecurityConfig,
}

/// The authentication endpoints: `/login` and `/refresh-token`.
///
/// Both accept POST only; axum's method router answers 405 for anything
/// else. Nest under your auth base path, e.g. `/api/auth` - if you change
/// the base path, adjust
/// [`RefreshCookieConfig::path`](crate::config::RefreshCookieConfig) to
/// match.
pub fn auth_routes<U>() -> Router<AppState<U>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<U>))
        .route("/refresh-token", post(handlers::refresh_token::<U>))
}
