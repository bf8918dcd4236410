use chrono::Duration;
use std::fmt;

use crate::crypto::SecretString;
use crate::AuthError;

/// Minimum required length for the signing secret in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Configuration for token generation and validation.
///
/// The signing secret is always supplied by the caller - typically from the
/// environment or external secret storage - and is never generated here.
/// Tests can therefore use deterministic secrets, and multiple instances can
/// share one. Note that a deployment which generates a fresh secret per
/// process invalidates all outstanding tokens on restart; supply the secret
/// externally if tokens must survive restarts.
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key used for signing tokens (HS256).
    pub(crate) secret: SecretString,
    /// Access token expiry duration. Default: 15 minutes.
    pub(crate) access_expiry: Duration,
    /// Refresh token expiry duration. Default: 24 hours.
    pub(crate) refresh_expiry: Duration,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("access_expiry", &self.access_expiry)
            .field("refresh_expiry", &self.refresh_expiry)
            .finish()
    }
}

impl JwtConfig {
    /// Creates a new configuration with the given signing secret.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if the secret is shorter than
    /// [`MIN_SECRET_LENGTH`] bytes.
    pub fn new(secret: impl Into<SecretString>) -> Result<Self, AuthError> {
        let secret = secret.into();

        if secret.expose_secret().len() < MIN_SECRET_LENGTH {
            return Err(AuthError::ConfigurationError(format!(
                "signing secret must be at least {MIN_SECRET_LENGTH} bytes, got {}",
                secret.expose_secret().len()
            )));
        }

        Ok(Self {
            secret,
            access_expiry: Duration::minutes(15),
            refresh_expiry: Duration::hours(24),
        })
    }

    /// Sets the access token expiry duration.
    #[must_use]
    pub fn with_access_expiry(mut self, expiry: Duration) -> Self {
        self.access_expiry = expiry;
        self
    }

    /// Sets the refresh token expiry duration.
    #[must_use]
    pub fn with_refresh_expiry(mut self, expiry: Duration) -> Self {
        self.refresh_expiry = expiry;
        self
    }

    /// Returns the configured access token expiry duration.
    pub fn access_expiry(&self) -> Duration {
        self.access_expiry
    }

    /// Returns the configured refresh token expiry duration.
    pub fn refresh_expiry(&self) -> Duration {
        self.refresh_expiry
    }
}
