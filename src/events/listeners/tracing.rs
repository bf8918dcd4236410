use async_trait::async_trait;

use crate::events::{AuthEvent, Listener};

/// Emits authentication events as tracing events.
///
/// Requires the `tracing` feature to be enabled.
///
/// # Example
///
/// ```rust,ignore
/// use bookmarket_auth::register_event_listeners;
/// use bookmarket_auth::events::listeners::TracingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(TracingListener);
/// });
/// ```
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &AuthEvent) {
        tracing::info!(
            target: "bookmarket_auth::events",
            event_name = event.name(),
            ?event,
            "auth event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_tracing_listener_handle() {
        let listener = TracingListener;
        let event = AuthEvent::TokenRefreshed {
            user_id: 1,
            at: Utc::now(),
        };

        // should not panic
        listener.handle(&event).await;
    }
}
