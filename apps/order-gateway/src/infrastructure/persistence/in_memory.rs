//! In-memory in-flight order registry.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::order_execution::{Order, OrderRepository};
use crate::domain::shared::{AccountId, OrderId, RepositoryError};

/// In-memory implementation of `OrderRepository`.
///
/// Each operation is atomic on its key. Not durable.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: DashMap<String, Order>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of orders in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), RepositoryError> {
        match self.orders.entry(order.client_order_id().to_string()) {
            Entry::Occupied(entry) => Err(RepositoryError::Duplicate {
                key: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(order.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, order: &Order) -> Result<(), RepositoryError> {
        match self.orders.get_mut(order.client_order_id().as_str()) {
            Some(mut existing) => {
                *existing = order.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                key: order.client_order_id().to_string(),
            }),
        }
    }

    async fn find(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders.get(id.as_str()).map(|o| o.value().clone()))
    }

    async fn remove(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders.remove(id.as_str()).map(|(_, order)| order))
    }

    async fn find_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| o.account_id() == account_id)
            .map(|o| o.value().clone())
            .collect();
        orders.sort_by_key(Order::created_at);
        Ok(orders)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::share_order;
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn insert_and_find() {
        let repo = InMemoryOrderRepository::new();
        let order = share_order("ord-1", "ACC-1", dec!(5));
        repo.insert(&order).await.unwrap();

        let found = repo.find(&OrderId::new("ord-1")).await.unwrap();
        assert!(found.is_some());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn insert_duplicate_fails() {
        let repo = InMemoryOrderRepository::new();
        let order = share_order("ord-1", "ACC-1", dec!(5));
        repo.insert(&order).await.unwrap();

        let err = repo.insert(&order).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate { key } if key == "ord-1"));
    }

    #[tokio::test]
    async fn update_missing_fails() {
        let repo = InMemoryOrderRepository::new();
        let order = share_order("ord-1", "ACC-1", dec!(5));
        let err = repo.update(&order).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn remove_returns_order_once() {
        let repo = InMemoryOrderRepository::new();
        let order = share_order("ord-1", "ACC-1", dec!(5));
        repo.insert(&order).await.unwrap();

        let id = OrderId::new("ord-1");
        assert!(repo.remove(&id).await.unwrap().is_some());
        assert!(repo.remove(&id).await.unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn find_by_account_filters() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(&share_order("ord-1", "ACC-1", dec!(5)))
            .await
            .unwrap();
        repo.insert(&share_order("ord-2", "ACC-2", dec!(5)))
            .await
            .unwrap();

        let orders = repo.find_by_account(&AccountId::new("ACC-1")).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].client_order_id().as_str(), "ord-1");
    }
}
