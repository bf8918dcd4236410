//! HTTP-surface configuration for the authentication pipeline.
//!
//! Token lifetimes and the signing secret live in
//! [`JwtConfig`](crate::jwt::JwtConfig); this module covers the pieces the
//! request pipeline reads: the bearer scheme prefix and the refresh-token
//! cookie settings.

use chrono::Duration;

/// Settings consumed by the authentication middleware and handlers.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Scheme prefix expected on the `Authorization` header.
    ///
    /// Default: `"Bearer "` (trailing space included).
    pub bearer_prefix: String,

    /// Refresh-token cookie settings.
    pub refresh_cookie: RefreshCookieConfig,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bearer_prefix: "Bearer ".to_owned(),
            refresh_cookie: RefreshCookieConfig::default(),
        }
    }
}

/// Settings for the HTTP-only cookie carrying the refresh token.
///
/// The default path scopes the cookie to the refresh endpoint so the long
/// lived token is not replayed on every request.
#[derive(Debug, Clone)]
pub struct RefreshCookieConfig {
    /// Cookie name. Default: `refreshToken`.
    pub name: String,

    /// Cookie path. Default: `/api/auth/refresh-token`.
    pub path: String,

    /// Marks the cookie `Secure`. Default: `true`.
    pub secure: bool,

    /// Marks the cookie `HttpOnly`. Default: `true`.
    pub http_only: bool,

    /// Cookie lifetime. Default: 24 hours, matching the default refresh
    /// token expiry.
    pub max_age: Duration,
}

impl Default for RefreshCookieConfig {
    fn default() -> Self {
        Self {
            name: "refreshToken".to_owned(),
            path: "/api/auth/refresh-token".to_owned(),
            secure: true,
            http_only: true,
            max_age: Duration::hours(24),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SecurityConfig::default();

        assert_eq!(config.bearer_prefix, "Bearer ");
        assert_eq!(config.refresh_cookie.name, "refreshToken");
        assert_eq!(config.refresh_cookie.path, "/api/auth/refresh-token");
        assert!(config.refresh_cookie.secure);
        assert!(config.refresh_cookie.http_only);
        assert_eq!(config.refresh_cookie.max_age, Duration::hours(24));
    }
}
