//! Notifier that writes events to the log.

use async_trait::async_trait;

use crate::application::ports::{Notification, NotificationError, NotificationPort};

/// Logs every notification as structured JSON at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

#[async_trait]
impl NotificationPort for LoggingNotifier {
    async fn notify_all(&self, notifications: Vec<Notification>) -> Result<(), NotificationError> {
        for notification in &notifications {
            let payload = serde_json::to_string(notification).map_err(|e| {
                NotificationError::SerializationError {
                    message: e.to_string(),
                }
            })?;
            tracing::info!(
                target: "order_gateway::notifications",
                event_type = notification.event_type(),
                payload = %payload,
                "Notification"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::OrderEvent;
    use crate::domain::order_execution::events::OrderRejected;
    use crate::domain::shared::{OrderId, Timestamp};

    #[tokio::test]
    async fn logging_notifier_accepts_events() {
        let notifier = LoggingNotifier;
        let event = OrderEvent::Rejected(OrderRejected {
            order_id: OrderId::new("ord-1"),
            reason: "halted".to_string(),
            occurred_at: Timestamp::now(),
        });
        notifier
            .notify(Notification::Order(event))
            .await
            .unwrap();
    }
}
