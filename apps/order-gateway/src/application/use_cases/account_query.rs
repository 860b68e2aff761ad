//! Account Query Use Case
//!
//! Side-effect-free reads for administrative callers.

use std::sync::Arc;

use crate::application::dto::{AccountSnapshotDto, OrderDto};
use crate::domain::cash_reserve::ReserveRepository;
use crate::domain::order_execution::{OrderHistoryRepository, OrderRepository};
use crate::domain::shared::AccountId;
use crate::error::GatewayError;

/// Reads over the stores owned by the core.
pub struct AccountQueryUseCase<O, H, R>
where
    O: OrderRepository,
    H: OrderHistoryRepository,
    R: ReserveRepository,
{
    orders: Arc<O>,
    history: Arc<H>,
    reserves: Arc<R>,
}

impl<O, H, R> AccountQueryUseCase<O, H, R>
where
    O: OrderRepository,
    H: OrderHistoryRepository,
    R: ReserveRepository,
{
    /// Create a new `AccountQueryUseCase`.
    pub const fn new(orders: Arc<O>, history: Arc<H>, reserves: Arc<R>) -> Self {
        Self {
            orders,
            history,
            reserves,
        }
    }

    /// Account and reserve snapshot, or `None` if the account never traded.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` if the store fails.
    pub async fn snapshot(&self, account_id: &str) -> Result<Option<AccountSnapshotDto>, GatewayError> {
        let account = self.reserves.find_account(&AccountId::new(account_id)).await?;
        Ok(account.as_ref().map(AccountSnapshotDto::from_account))
    }

    /// In-flight orders for an account, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` if the store fails.
    pub async fn pending_orders(&self, account_id: &str) -> Result<Vec<OrderDto>, GatewayError> {
        let orders = self.orders.find_by_account(&AccountId::new(account_id)).await?;
        Ok(orders.iter().map(OrderDto::from_order).collect())
    }

    /// Archived orders for an account, in archive order.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` if the store fails.
    pub async fn trade_history(&self, account_id: &str) -> Result<Vec<OrderDto>, GatewayError> {
        let orders = self.history.find_by_account(&AccountId::new(account_id)).await?;
        Ok(orders.iter().map(OrderDto::from_order).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{Harness, MarketMode, dollars, shares};
    use crate::domain::order_execution::{OrderSide, OrderStatus};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn unknown_account_has_no_snapshot() {
        let harness = Harness::new(MarketMode::Accept, dec!(100));
        assert!(harness.query().snapshot("ACC-9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reads_reflect_core_state() {
        let harness = Harness::new(MarketMode::Accept, dec!(100));
        let submit = harness.submit();
        submit
            .execute(shares("ord-1", "AAPL", OrderSide::Sell, dec!(10.25)))
            .await;
        submit
            .execute(dollars("ord-2", "BRK", OrderSide::Sell, dec!(20)))
            .await;

        let query = harness.query();
        let snapshot = query.snapshot("ACC-1").await.unwrap().unwrap();
        assert_eq!(snapshot.reserves.len(), 2);
        assert_eq!(snapshot.reserves[0].symbol, "AAPL");
        assert_eq!(snapshot.reserves[0].available, dec!(97.50));
        assert_eq!(snapshot.total_balance, dec!(180));

        let pending = query.pending_orders("ACC-1").await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].client_order_id, "ord-1");

        let history = query.trade_history("ACC-1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, OrderStatus::Filled);
        assert_eq!(history[0].executions.len(), 1);
    }
}
