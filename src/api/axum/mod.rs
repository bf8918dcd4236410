//! Axum bindings for the authentication pipeline.
//!
//! Wire-up:
//!
//! ```rust,ignore
//! use axum::{middleware, Router};
//! use bookmarket_auth::api::axum::{auth_routes, authenticate, AppState};
//!
//! let state = AppState { user_repo, jwt_service, security };
//!
//! let app = Router::new()
//!     .nest("/api/auth", auth_routes::<MyUserRepository>())
//!     // ... application routes ...
//!     .layer(middleware::from_fn_with_state(
//!         state.clone(),
//!         authenticate::<MyUserRepository>,
//!     ))
//!     .with_state(state);
//! ```

mod error;
mod handlers;
mod middleware;
mod routes;

pub use error::AppError;
pub use middleware::{authenticate, extract_bearer_token, CurrentUser};
pub use routes::{auth_routes, AppState};
