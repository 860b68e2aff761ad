//! Notification Port (Driven Port)
//!
//! Forwards order and reserve events upstream.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::cash_reserve::ReserveEvent;
use crate::domain::order_execution::OrderEvent;

/// Anything the gateway reports upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "event", rename_all = "snake_case")]
pub enum Notification {
    /// Order lifecycle event.
    Order(OrderEvent),
    /// Reserve event.
    Reserve(ReserveEvent),
}

impl Notification {
    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Order(e) => e.event_type(),
            Self::Reserve(e) => e.event_type(),
        }
    }
}

/// Notification error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationError {
    /// Upstream is gone.
    #[error("Notification channel closed")]
    ChannelClosed,

    /// Serialization error.
    #[error("Notification serialization error: {message}")]
    SerializationError {
        /// Error details.
        message: String,
    },
}

/// Port for upstream notifications.
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Publish notifications in order.
    async fn notify_all(&self, notifications: Vec<Notification>) -> Result<(), NotificationError>;

    /// Publish a single notification.
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        self.notify_all(vec![notification]).await
    }
}

/// No-op notifier.
#[derive(Debug, Clone, Default)]
pub struct NoOpNotifier;

#[async_trait]
impl NotificationPort for NoOpNotifier {
    async fn notify_all(&self, _notifications: Vec<Notification>) -> Result<(), NotificationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::events::{OrderEvent, OrderRejected};
    use crate::domain::shared::{OrderId, Timestamp};

    #[tokio::test]
    async fn no_op_notifier_succeeds() {
        let event = Notification::Order(OrderEvent::Rejected(OrderRejected {
            order_id: OrderId::new("ord-1"),
            reason: "test".to_string(),
            occurred_at: Timestamp::now(),
        }));
        assert_eq!(event.event_type(), "ORDER_REJECTED");
        assert!(NoOpNotifier.notify(event).await.is_ok());
    }
}
