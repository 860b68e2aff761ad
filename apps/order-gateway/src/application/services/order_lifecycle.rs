//! Order Lifecycle Manager
//!
//! Owns the in-flight registry, the per-order critical section, archival
//! and event forwarding. Use cases take the order lock, then load, mutate
//! and either save or archive.

use std::sync::Arc;

use super::{KeyGuard, KeyedLocks};
use crate::application::ports::{Notification, NotificationPort};
use crate::domain::order_execution::{Order, OrderHistoryRepository, OrderRepository};
use crate::domain::shared::OrderId;
use crate::error::GatewayError;

/// In-flight registry plus archive.
pub struct OrderLifecycleManager<O, H, N>
where
    O: OrderRepository,
    H: OrderHistoryRepository,
    N: NotificationPort,
{
    orders: Arc<O>,
    history: Arc<H>,
    notifier: Arc<N>,
    locks: KeyedLocks,
}

impl<O, H, N> OrderLifecycleManager<O, H, N>
where
    O: OrderRepository,
    H: OrderHistoryRepository,
    N: NotificationPort,
{
    /// Create a new lifecycle manager.
    pub fn new(orders: Arc<O>, history: Arc<H>, notifier: Arc<N>) -> Self {
        Self {
            orders,
            history,
            notifier,
            locks: KeyedLocks::new(),
        }
    }

    /// Enter the critical section for one order ID.
    pub async fn lock(&self, id: &OrderId) -> KeyGuard {
        self.locks.lock(id.as_str()).await
    }

    /// Add a new order to the registry.
    ///
    /// # Errors
    ///
    /// Returns `DUPLICATE_ORDER_ID` if the ID is already in flight.
    pub async fn register(&self, order: &Order) -> Result<(), GatewayError> {
        self.orders.insert(order).await?;
        tracing::debug!(client_order_id = %order.client_order_id(), "Order registered");
        Ok(())
    }

    /// Look up an in-flight order.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` if the store fails.
    pub async fn find(&self, id: &OrderId) -> Result<Option<Order>, GatewayError> {
        Ok(self.orders.find(id).await?)
    }

    /// Write back a non-terminal order.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` if the order is no longer in flight or the store fails.
    pub async fn save(&self, order: &Order) -> Result<(), GatewayError> {
        Ok(self.orders.update(order).await?)
    }

    /// Move a terminal order from the registry to history.
    ///
    /// Only the caller that removes the registry entry appends, so each
    /// order is archived once. Returns whether this call archived it.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` if the store fails.
    pub async fn archive(&self, order: &Order) -> Result<bool, GatewayError> {
        let id = order.client_order_id();
        if self.orders.remove(id).await?.is_none() {
            tracing::warn!(client_order_id = %id, "Order already left the registry, not archiving");
            return Ok(false);
        }
        if let Err(e) = self.history.append(order).await {
            // Put it back so a retry can archive it.
            if let Err(restore) = self.orders.insert(order).await {
                tracing::error!(client_order_id = %id, error = %restore, "Failed to restore order after archive failure");
            }
            return Err(e.into());
        }
        tracing::info!(
            client_order_id = %id,
            status = %order.status(),
            executed_quantity = %order.executed_quantity(),
            "Order archived"
        );
        Ok(true)
    }

    /// Forward the order's pending events upstream.
    pub async fn publish(&self, order: &mut Order) {
        let events = order.drain_events();
        if events.is_empty() {
            return;
        }
        let notifications = events.into_iter().map(Notification::Order).collect();
        if let Err(e) = self.notifier.notify_all(notifications).await {
            tracing::error!(
                client_order_id = %order.client_order_id(),
                error = %e,
                "Failed to publish order events"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NotificationError;
    use crate::error::ErrorCode;
    use crate::infrastructure::persistence::in_memory::fixtures::share_order;
    use crate::infrastructure::persistence::{InMemoryOrderHistory, InMemoryOrderRepository};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationPort for RecordingNotifier {
        async fn notify_all(&self, notifications: Vec<Notification>) -> Result<(), NotificationError> {
            let mut seen = self.seen.lock().await;
            seen.extend(notifications.iter().map(|n| n.event_type().to_string()));
            Ok(())
        }
    }

    type Manager = OrderLifecycleManager<InMemoryOrderRepository, InMemoryOrderHistory, RecordingNotifier>;

    fn manager() -> (Manager, Arc<InMemoryOrderHistory>, Arc<RecordingNotifier>) {
        let history = Arc::new(InMemoryOrderHistory::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let manager = OrderLifecycleManager::new(
            Arc::new(InMemoryOrderRepository::new()),
            Arc::clone(&history),
            Arc::clone(&notifier),
        );
        (manager, history, notifier)
    }

    #[tokio::test]
    async fn register_rejects_duplicate_id() {
        let (manager, _, _) = manager();
        let order = share_order("ord-1", "ACC-1", dec!(5));
        manager.register(&order).await.unwrap();

        let err = manager.register(&order).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicateOrderId);
    }

    #[tokio::test]
    async fn archive_happens_once() {
        let (manager, history, _) = manager();
        let mut order = share_order("ord-1", "ACC-1", dec!(5));
        manager.register(&order).await.unwrap();
        order.reject("test").unwrap();

        assert!(manager.archive(&order).await.unwrap());
        assert!(!manager.archive(&order).await.unwrap());

        let id = OrderId::new("ord-1");
        assert_eq!(history.count_for(&id).await.unwrap(), 1);
        assert!(manager.find(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn publish_drains_events() {
        let (manager, _, notifier) = manager();
        let mut order = share_order("ord-1", "ACC-1", dec!(5));
        order.reject("test").unwrap();

        manager.publish(&mut order).await;
        manager.publish(&mut order).await;

        let seen = notifier.seen.lock().await;
        assert_eq!(*seen, ["ORDER_RECEIVED", "ORDER_REJECTED"]);
        assert!(order.drain_events().is_empty());
    }
}
