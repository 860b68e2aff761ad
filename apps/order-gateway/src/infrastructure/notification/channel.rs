//! Notifier that forwards events over a channel.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{Notification, NotificationError, NotificationPort};

/// Sends every notification to an unbounded channel.
///
/// The receiving side forwards them upstream.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver for its events.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl NotificationPort for ChannelNotifier {
    async fn notify_all(&self, notifications: Vec<Notification>) -> Result<(), NotificationError> {
        for notification in notifications {
            self.tx
                .send(notification)
                .map_err(|_| NotificationError::ChannelClosed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cash_reserve::{LowBalanceAlert, ReserveEvent, ReserveKey};
    use crate::domain::shared::{AccountId, Money, Symbol, Timestamp};
    use rust_decimal_macros::dec;

    fn alert() -> Notification {
        Notification::Reserve(ReserveEvent::LowBalance(LowBalanceAlert {
            key: ReserveKey::new(AccountId::new("ACC-1"), Symbol::new("AAPL")),
            balance: Money::new(dec!(5)),
            threshold: Money::new(dec!(10)),
            occurred_at: Timestamp::now(),
        }))
    }

    #[tokio::test]
    async fn forwards_in_order() {
        let (notifier, mut rx) = ChannelNotifier::channel();
        notifier.notify_all(vec![alert(), alert()]).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().event_type(), "RESERVE_LOW_BALANCE");
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn closed_receiver_is_an_error() {
        let (notifier, rx) = ChannelNotifier::channel();
        drop(rx);
        let err = notifier.notify(alert()).await.unwrap_err();
        assert!(matches!(err, NotificationError::ChannelClosed));
    }
}
