//! Cancel Order Use Case

use std::sync::Arc;
use std::time::Duration;

use crate::application::dto::{CancelInstruction, InstructionResponse};
use crate::application::ports::{MarketCancelRequest, MarketError, MarketRoutingPort, NotificationPort};
use crate::application::services::{OrderLifecycleManager, SettlementService};
use crate::domain::cash_reserve::ReserveRepository;
use crate::domain::order_execution::{Order, OrderHistoryRepository, OrderRepository, OrderStatus};
use crate::domain::shared::{Money, OrderId};
use crate::error::GatewayError;
use crate::observability;

/// Use case for canceling in-flight orders.
pub struct CancelOrderUseCase<M, O, H, R, N>
where
    M: MarketRoutingPort,
    O: OrderRepository,
    H: OrderHistoryRepository,
    R: ReserveRepository,
    N: NotificationPort,
{
    market: Arc<M>,
    lifecycle: Arc<OrderLifecycleManager<O, H, N>>,
    settlement: Arc<SettlementService<R, N>>,
    routing_timeout: Duration,
}

impl<M, O, H, R, N> CancelOrderUseCase<M, O, H, R, N>
where
    M: MarketRoutingPort,
    O: OrderRepository,
    H: OrderHistoryRepository,
    R: ReserveRepository,
    N: NotificationPort,
{
    /// Create a new `CancelOrderUseCase`.
    pub const fn new(
        market: Arc<M>,
        lifecycle: Arc<OrderLifecycleManager<O, H, N>>,
        settlement: Arc<SettlementService<R, N>>,
        routing_timeout: Duration,
    ) -> Self {
        Self {
            market,
            lifecycle,
            settlement,
            routing_timeout,
        }
    }

    /// Execute the use case.
    ///
    /// Unsubmitted orders are canceled locally. Orders at the market get the
    /// cancel forwarded and stay in flight until the market confirms.
    pub async fn execute(&self, cancel: CancelInstruction) -> InstructionResponse {
        let cancel_id = cancel.client_order_id.trim().to_string();
        let original = cancel.original_client_order_id.trim();
        if cancel_id.is_empty() || original.is_empty() {
            let e = GatewayError::invalid_instruction(
                "cancel requires client order id and original client order id",
            );
            return InstructionResponse::rejected(cancel_id, &e);
        }

        let original = OrderId::new(original);
        let _guard = self.lifecycle.lock(&original).await;

        let order = match self.lifecycle.find(&original).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                tracing::info!(original_client_order_id = %original, "Cancel for unknown order");
                return InstructionResponse::rejected(
                    cancel_id,
                    &GatewayError::order_not_found(original.as_str()),
                );
            }
            Err(e) => return InstructionResponse::rejected(cancel_id, &e),
        };

        match order.status() {
            OrderStatus::PendingNew => self.cancel_unsubmitted(order, cancel_id).await,
            status if status.is_working() => self.forward(order, cancel_id).await,
            // Terminal orders leave the registry when they finish.
            _ => InstructionResponse::rejected(
                cancel_id,
                &GatewayError::order_not_found(original.as_str()),
            ),
        }
    }

    async fn cancel_unsubmitted(&self, mut order: Order, cancel_id: String) -> InstructionResponse {
        if let Err(e) = order.cancel_unsubmitted("Canceled before routing") {
            return InstructionResponse::rejected(cancel_id, &GatewayError::from(e));
        }

        let released = match self.settlement.release(&mut order).await {
            Ok(released) => released,
            Err(e) => {
                tracing::error!(client_order_id = %order.client_order_id(), error = %e, "Release failed");
                order.add_note(format!("Release failed: {}", e.message()));
                Money::ZERO
            }
        };
        if let Err(e) = self.lifecycle.archive(&order).await {
            tracing::error!(client_order_id = %order.client_order_id(), error = %e, "Failed to archive order");
        }
        self.lifecycle.publish(&mut order).await;

        tracing::info!(
            client_order_id = %order.client_order_id(),
            released = %released,
            "Unsubmitted order canceled"
        );
        InstructionResponse::accepted(cancel_id, "order canceled")
    }

    async fn forward(&self, mut order: Order, cancel_id: String) -> InstructionResponse {
        let market_order_id = order.market_order_id().map(ToString::to_string);
        if order.cancel_requested() {
            return InstructionResponse::accepted(cancel_id, "cancel already requested")
                .with_market_order_id(market_order_id);
        }

        let request = MarketCancelRequest {
            original_client_order_id: order.client_order_id().clone(),
            cancel_client_order_id: OrderId::new(cancel_id.as_str()),
            market_order_id: order.market_order_id().cloned(),
            symbol: order.symbol().clone(),
        };
        let timeout_ms = u64::try_from(self.routing_timeout.as_millis()).unwrap_or(u64::MAX);
        let result = match tokio::time::timeout(self.routing_timeout, self.market.cancel_order(request)).await {
            Ok(result) => result,
            Err(_) => Err(MarketError::Timeout { timeout_ms }),
        };

        if let Err(e) = result {
            observability::record_routing_failure("cancel", e.kind());
            tracing::warn!(
                client_order_id = %order.client_order_id(),
                error = %e,
                "Cancel not forwarded to market"
            );
            return InstructionResponse::rejected(cancel_id, &GatewayError::from(e))
                .with_market_order_id(market_order_id);
        }

        if let Err(e) = order.request_cancel() {
            return InstructionResponse::rejected(cancel_id, &GatewayError::from(e));
        }
        if let Err(e) = self.lifecycle.save(&order).await {
            tracing::error!(client_order_id = %order.client_order_id(), error = %e, "Failed to save order");
        }
        self.lifecycle.publish(&mut order).await;

        tracing::info!(client_order_id = %order.client_order_id(), "Cancel forwarded to market");
        InstructionResponse::accepted(cancel_id, "cancel requested").with_market_order_id(market_order_id)
    }
}
