//! In-memory archive of terminal orders.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::order_execution::{Order, OrderHistoryRepository};
use crate::domain::shared::{AccountId, OrderId, RepositoryError};

/// Append-only in-memory ledger.
#[derive(Debug, Default)]
pub struct InMemoryOrderHistory {
    ledger: RwLock<Vec<Order>>,
}

impl InMemoryOrderHistory {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of archived orders.
    pub async fn len(&self) -> usize {
        self.ledger.read().await.len()
    }
}

#[async_trait]
impl OrderHistoryRepository for InMemoryOrderHistory {
    async fn append(&self, order: &Order) -> Result<(), RepositoryError> {
        self.ledger.write().await.push(order.clone());
        Ok(())
    }

    async fn find_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .ledger
            .read()
            .await
            .iter()
            .filter(|o| o.account_id() == account_id)
            .cloned()
            .collect())
    }

    async fn count_for(&self, id: &OrderId) -> Result<usize, RepositoryError> {
        Ok(self
            .ledger
            .read()
            .await
            .iter()
            .filter(|o| o.client_order_id() == id)
            .count())
    }
}
