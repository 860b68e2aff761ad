//! Cash Settlement Service
//!
//! Serializes every reserve mutation per (account, instrument): the
//! reservation made by the reconciliation engine, release and adjustment
//! on fills, and release on cancel or rejection.

use std::sync::Arc;

use super::KeyedLocks;
use crate::application::ports::{Notification, NotificationPort};
use crate::domain::cash_reserve::{CashReserve, ReserveEvent, ReserveKey, ReserveLimits, ReserveRepository};
use crate::domain::order_execution::Order;
use crate::domain::reconciliation::{
    ReconciliationEngine, ReconciliationOutcome, ReconciliationRequest, SettlementPolicy,
};
use crate::domain::shared::Money;
use crate::error::GatewayError;
use crate::observability;

/// Result of a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Engine decision.
    pub outcome: ReconciliationOutcome,
    /// Reserve balance after the reservation.
    pub balance: Money,
}

/// Owns the reserve critical sections.
pub struct SettlementService<R, N>
where
    R: ReserveRepository,
    N: NotificationPort,
{
    reserves: Arc<R>,
    notifier: Arc<N>,
    locks: KeyedLocks,
    limits: ReserveLimits,
    engine: ReconciliationEngine,
}

impl<R, N> SettlementService<R, N>
where
    R: ReserveRepository,
    N: NotificationPort,
{
    /// Create a new settlement service.
    pub fn new(
        reserves: Arc<R>,
        notifier: Arc<N>,
        limits: ReserveLimits,
        engine: ReconciliationEngine,
    ) -> Self {
        Self {
            reserves,
            notifier,
            locks: KeyedLocks::new(),
            limits,
            engine,
        }
    }

    /// Limits new reserves open with.
    #[must_use]
    pub const fn limits(&self) -> &ReserveLimits {
        &self.limits
    }

    /// Run the reconciliation engine against the order's reserve.
    ///
    /// The reservation is persisted only if the engine succeeds.
    ///
    /// # Errors
    ///
    /// Returns `INSUFFICIENT_CASH` or `INVALID_INSTRUCTION` from the engine,
    /// or `INTERNAL_ERROR` if the store fails.
    pub async fn reserve(
        &self,
        key: &ReserveKey,
        request: &ReconciliationRequest,
    ) -> Result<Reservation, GatewayError> {
        let _guard = self.locks.lock(&key.to_string()).await;
        let mut reserve = self.load_or_open(key).await?;

        let outcome = self.engine.reconcile(&mut reserve, request)?;
        self.reserves.save(&reserve).await?;

        tracing::debug!(
            reserve = %key,
            allocated = %outcome.cash_allocated,
            available = %reserve.available(),
            "Reservation applied"
        );

        let balance = reserve.balance();
        self.publish(reserve.drain_events()).await;
        Ok(Reservation { outcome, balance })
    }

    /// Apply whatever the order's fills owe the reserve and not yet settled.
    ///
    /// Returns the reserve balance afterwards, or `None` if nothing was owed.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` if the store fails. Nothing is recorded on
    /// the order then.
    pub async fn settle(&self, order: &mut Order) -> Result<Option<Money>, GatewayError> {
        let delta = SettlementPolicy::delta(order);
        if delta.is_empty() {
            return Ok(None);
        }

        let key = ReserveKey::new(order.account_id().clone(), order.symbol().clone());
        let _guard = self.locks.lock(&key.to_string()).await;
        let mut reserve = self.load_or_open(&key).await?;

        let released = reserve.release(delta.release);
        if released < delta.release {
            tracing::warn!(
                reserve = %key,
                requested = %delta.release,
                released = %released,
                "Reserve held less pending cash than the fill releases"
            );
        }
        if !delta.adjust.is_zero() {
            reserve
                .adjust(delta.adjust)
                .map_err(|e| GatewayError::internal(e.to_string()))?;
        }
        self.reserves.save(&reserve).await?;
        order.record_settlement(delta.release, delta.adjust);

        tracing::info!(
            client_order_id = %order.client_order_id(),
            reserve = %key,
            released = %delta.release,
            adjustment = %delta.adjust,
            balance = %reserve.balance(),
            "Settled execution against reserve"
        );

        let balance = reserve.balance();
        self.publish(reserve.drain_events()).await;
        Ok(Some(balance))
    }

    /// Return the order's outstanding allocation to the reserve.
    ///
    /// Returns the amount released.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` if the store fails.
    pub async fn release(&self, order: &mut Order) -> Result<Money, GatewayError> {
        let amount = order.outstanding_allocation();
        if amount.is_zero() {
            return Ok(Money::ZERO);
        }

        let key = ReserveKey::new(order.account_id().clone(), order.symbol().clone());
        let released = self.release_amount(&key, amount).await?;
        order.record_release(released);

        tracing::debug!(
            client_order_id = %order.client_order_id(),
            reserve = %key,
            released = %released,
            "Released reservation"
        );
        Ok(released)
    }

    /// Return `amount` of pending reduction to available cash.
    ///
    /// Releases at most what the reserve holds pending.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` if the store fails.
    pub async fn release_amount(&self, key: &ReserveKey, amount: Money) -> Result<Money, GatewayError> {
        let _guard = self.locks.lock(&key.to_string()).await;
        let mut reserve = self.load_or_open(key).await?;

        let released = reserve.release(amount);
        self.reserves.save(&reserve).await?;
        if released < amount {
            tracing::warn!(
                reserve = %key,
                requested = %amount,
                released = %released,
                "Reserve held less pending cash than requested for release"
            );
        }

        self.publish(reserve.drain_events()).await;
        Ok(released)
    }

    async fn load_or_open(&self, key: &ReserveKey) -> Result<CashReserve, GatewayError> {
        match self.reserves.find(key).await? {
            Some(reserve) => Ok(reserve),
            None => {
                tracing::info!(reserve = %key, balance = %self.limits.initial_balance, "Opening cash reserve");
                Ok(CashReserve::open(key.clone(), &self.limits))
            }
        }
    }

    async fn publish(&self, events: Vec<ReserveEvent>) {
        if events.is_empty() {
            return;
        }
        for event in &events {
            match event {
                ReserveEvent::LowBalance(alert) => {
                    observability::record_low_balance_alert(alert.key.symbol.as_str());
                    tracing::warn!(
                        reserve = %alert.key,
                        balance = %alert.balance,
                        threshold = %alert.threshold,
                        "Cash reserve at or below threshold"
                    );
                }
                ReserveEvent::BalanceRecovered(recovered) => {
                    tracing::info!(
                        reserve = %recovered.key,
                        balance = %recovered.balance,
                        "Cash reserve recovered above threshold"
                    );
                }
            }
        }
        let notifications = events.into_iter().map(Notification::Reserve).collect();
        if let Err(e) = self.notifier.notify_all(notifications).await {
            tracing::error!(error = %e, "Failed to publish reserve events");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NoOpNotifier;
    use crate::domain::order_execution::{
        CreateOrderCommand, ExecutionReport, InstructionAmount, TradeType,
    };
    use crate::domain::shared::{AccountId, ExecutionId, OrderId, Quantity, Symbol, Timestamp};
    use crate::error::ErrorCode;
    use crate::infrastructure::persistence::InMemoryReserveRepository;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn service(initial: Decimal) -> SettlementService<InMemoryReserveRepository, NoOpNotifier> {
        SettlementService::new(
            Arc::new(InMemoryReserveRepository::new()),
            Arc::new(NoOpNotifier),
            ReserveLimits {
                initial_balance: Money::new(initial),
                low_balance_threshold: Money::new(dec!(10)),
                max_per_order: Money::new(dec!(1000)),
            },
            ReconciliationEngine::default(),
        )
    }

    fn order(trade_type: TradeType, amount: InstructionAmount, price: Decimal) -> Order {
        Order::new(CreateOrderCommand {
            client_order_id: OrderId::new("ord-1"),
            account_id: AccountId::new("ACC-1"),
            symbol: Symbol::new("AAPL"),
            trade_type,
            amount,
            reference_price: Money::new(price),
        })
        .unwrap()
    }

    fn key() -> ReserveKey {
        ReserveKey::new(AccountId::new("ACC-1"), Symbol::new("AAPL"))
    }

    fn report(status: &str, cum_qty: Decimal, avg: Decimal) -> ExecutionReport {
        ExecutionReport {
            client_order_id: OrderId::new("ord-1"),
            market_order_id: None,
            execution_id: ExecutionId::generate(),
            status_code: status.to_string(),
            cumulative_quantity: Quantity::new(cum_qty),
            last_quantity: Quantity::new(cum_qty),
            last_price: Money::new(avg),
            average_price: Money::new(avg),
            transact_time: Timestamp::now(),
        }
    }

    async fn reserve_for(
        svc: &SettlementService<InMemoryReserveRepository, NoOpNotifier>,
        order: &mut Order,
    ) -> Reservation {
        let reservation = svc
            .reserve(&key(), &ReconciliationRequest::for_order(order))
            .await
            .unwrap();
        order
            .record_routing(reservation.outcome.routing_decision())
            .unwrap();
        reservation
    }

    async fn current(svc: &SettlementService<InMemoryReserveRepository, NoOpNotifier>) -> CashReserve {
        svc.reserves.find(&key()).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn reserve_persists_reservation() {
        let svc = service(dec!(100));
        let mut order = order(
            TradeType::ShareSell,
            InstructionAmount::Shares(Quantity::new(dec!(10.25))),
            dec!(10),
        );
        let reservation = reserve_for(&svc, &mut order).await;

        assert_eq!(reservation.outcome.cash_allocated.amount(), dec!(2.50));
        assert_eq!(reservation.balance.amount(), dec!(100));
        assert_eq!(current(&svc).await.pending_reduction().amount(), dec!(2.50));
    }

    #[tokio::test]
    async fn failed_reservation_persists_nothing() {
        let svc = service(dec!(1));
        let order = order(
            TradeType::ShareSell,
            InstructionAmount::Shares(Quantity::new(dec!(10.25))),
            dec!(10),
        );
        let err = svc
            .reserve(&key(), &ReconciliationRequest::for_order(&order))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InsufficientCash);
        assert!(svc.reserves.find(&key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dollar_purchase_fill_returns_unexecuted_value() {
        let svc = service(dec!(20));
        let mut order = order(
            TradeType::DollarPurchase,
            InstructionAmount::Dollars(Money::new(dec!(50))),
            dec!(10),
        );
        reserve_for(&svc, &mut order).await;
        order
            .mark_submitted(crate::domain::shared::MarketOrderId::new("M-1"))
            .unwrap();

        // 6.5 shares at 10.00: executed value 65 of 70 sent.
        order
            .apply_execution_report(&report("2", dec!(6.5), dec!(10)))
            .unwrap();
        let balance = svc.settle(&mut order).await.unwrap().unwrap();

        // 20 released from pending, 5 unexecuted credited back.
        assert_eq!(balance.amount(), dec!(25));
        let reserve = current(&svc).await;
        assert!(reserve.pending_reduction().is_zero());

        // A second settle owes nothing.
        assert!(svc.settle(&mut order).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn share_sell_fill_keeps_balance() {
        let svc = service(dec!(100));
        let mut order = order(
            TradeType::ShareSell,
            InstructionAmount::Shares(Quantity::new(dec!(2.5))),
            dec!(10),
        );
        reserve_for(&svc, &mut order).await;
        order
            .mark_submitted(crate::domain::shared::MarketOrderId::new("M-1"))
            .unwrap();
        order
            .apply_execution_report(&report("2", dec!(2), dec!(10)))
            .unwrap();

        let balance = svc.settle(&mut order).await.unwrap().unwrap();
        assert_eq!(balance.amount(), dec!(100));
        assert!(current(&svc).await.pending_reduction().is_zero());
    }

    #[tokio::test]
    async fn cash_covered_share_purchase_credits_once() {
        let svc = service(dec!(100));
        let mut order = order(
            TradeType::SharePurchase,
            InstructionAmount::Shares(Quantity::new(dec!(0.3))),
            dec!(100),
        );
        reserve_for(&svc, &mut order).await;
        order.fill_from_reserve(ExecutionId::generate()).unwrap();

        let balance = svc.settle(&mut order).await.unwrap().unwrap();
        assert_eq!(balance.amount(), dec!(130));
        assert!(svc.settle(&mut order).await.unwrap().is_none());
        assert_eq!(current(&svc).await.balance().amount(), dec!(130));
    }

    #[tokio::test]
    async fn release_returns_allocation_once() {
        let svc = service(dec!(100));
        let mut order = order(
            TradeType::DollarSell,
            InstructionAmount::Dollars(Money::new(dec!(150))),
            dec!(10),
        );
        reserve_for(&svc, &mut order).await;
        order.reject("market down").unwrap();

        let released = svc.release(&mut order).await.unwrap();
        assert_eq!(released.amount(), dec!(100));
        assert!(current(&svc).await.pending_reduction().is_zero());

        assert!(svc.release(&mut order).await.unwrap().is_zero());
    }
}
