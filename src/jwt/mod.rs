//! Signed token issuance and validation.
//!
//! Tokens are compact JWS strings carrying the claims `iss`, `exp`, `id`,
//! `isRefresh` and, for access tokens only, `roles`. The signing secret is
//! injected through [`JwtConfig`] and held for the process lifetime.
//!
//! # Example
//!
//! ```ignore
//! use bookmarket_auth::jwt::{JwtConfig, JwtService};
//!
//! let config = JwtConfig::new("a-secret-of-at-least-32-bytes!!!")?
//!     .with_access_expiry(chrono::Duration::minutes(15))
//!     .with_refresh_expiry(chrono::Duration::hours(24));
//! let service = JwtService::new(config);
//!
//! let access = service.generate_access_token(&principal)?;
//! assert!(service.validate_token(&access));
//!
//! // Claims stay readable after expiry; validation does not.
//! let claims = service.claims(&access)?;
//! ```

mod claims;
mod config;
mod service;

pub use claims::TokenClaims;
pub use config::{JwtConfig, MIN_SECRET_LENGTH};
pub use service::{JwtService, ISSUER};
