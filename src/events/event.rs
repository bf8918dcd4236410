use chrono::{DateTime, Utc};

/// Authentication events emitted by the login and refresh actions.
///
/// Events are always fired from actions. If no listeners are registered,
/// they are silently ignored (no-op). Register listeners via
/// [`register_event_listeners`](crate::register_event_listeners) to handle
/// events.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    LoginSuccess {
        user_id: i64,
        login: String,
        at: DateTime<Utc>,
    },
    LoginFailed {
        login: String,
        reason: String,
        at: DateTime<Utc>,
    },
    TokenRefreshed {
        user_id: i64,
        at: DateTime<Utc>,
    },
}

impl AuthEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginSuccess { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::TokenRefreshed { .. } => "auth.token.refreshed",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::LoginSuccess { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::TokenRefreshed { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            AuthEvent::LoginSuccess {
                user_id: 1,
                login: "reader".to_owned(),
                at: now
            }
            .name(),
            "auth.login.success"
        );

        assert_eq!(
            AuthEvent::LoginFailed {
                login: "reader".to_owned(),
                reason: "password mismatch".to_owned(),
                at: now
            }
            .name(),
            "auth.login.failed"
        );

        assert_eq!(
            AuthEvent::TokenRefreshed {
                user_id: 1,
                at: now
            }
            .name(),
            "auth.token.refreshed"
        );
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();

        let event = AuthEvent::LoginSuccess {
            user_id: 1,
            login: "reader".to_owned(),
            at: now,
        };

        assert_eq!(event.timestamp(), now);
    }
}
