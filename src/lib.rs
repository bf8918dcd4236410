//! Stateless bearer-token authentication for the book market platform.
//!
//! The crate covers the full authentication pipeline: credential checks at
//! login, minting of signed access/refresh token pairs, per-request bearer
//! token validation, and access-token refresh against a refresh-token cookie.
//! Persistence is abstracted behind [`UserRepository`]; the HTTP surface
//! lives in [`api::axum`] behind the `axum_support` feature.
//!
//! # Example
//!
//! ```ignore
//! use bookmarket_auth::actions::LoginAction;
//! use bookmarket_auth::jwt::{JwtConfig, JwtService};
//!
//! let config = JwtConfig::new(std::env::var("JWT_SECRET")?)?
//!     .with_access_expiry(chrono::Duration::minutes(15));
//! let jwt_service = JwtService::new(config);
//!
//! let action = LoginAction::new(user_repository, jwt_service);
//! let outcome = action.execute("reader", &"secret".into()).await?;
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod crypto;
pub mod events;
pub mod jwt;
pub mod principal;
pub mod repository;

pub use crypto::SecretString;
pub use principal::{AccountStatus, AuthenticatedUser};
pub use repository::StoredUser;
pub use repository::UserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockUserRepository;

pub use events::register_event_listeners;

use std::fmt;

/// Errors produced by the authentication core.
///
/// Credential failures deliberately collapse into
/// [`InvalidCredentials`](AuthError::InvalidCredentials) so that responses
/// never reveal whether the login or the password was wrong.
/// [`BearerToken`](AuthError::BearerToken) carries a human-readable reason;
/// it only ever describes token shape, never account existence.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    InvalidCredentials,
    AccountBlocked,
    TokenExpired,
    TokenInvalid,
    BearerToken(String),
    PasswordHashError,
    ConfigurationError(String),
    StoreError(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Bad credentials"),
            AuthError::AccountBlocked => write!(f, "This account is blocked"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::TokenInvalid => write!(f, "Invalid token"),
            AuthError::BearerToken(msg) => write!(f, "{}", msg),
            AuthError::PasswordHashError => write!(f, "Failed to process password hash"),
            AuthError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            AuthError::StoreError(msg) => write!(f, "User store error: {}", msg),
        }
    }
}
