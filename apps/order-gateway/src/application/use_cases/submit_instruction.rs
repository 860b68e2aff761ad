//! Submit Instruction Use Case
//!
//! Validates an instruction, reconciles it against the cash reserve and
//! either fills it from the reserve or routes the remainder to the market.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::dto::{Instruction, InstructionResponse, ValidatedInstruction};
use crate::application::ports::{
    MarketError, MarketOrderRequest, MarketRoutingPort, NotificationPort, PriceOraclePort,
};
use crate::application::services::{
    OrderLifecycleManager, ReferencePriceService, Reservation, SettlementService,
};
use crate::domain::cash_reserve::{ReserveKey, ReserveRepository};
use crate::domain::order_execution::{
    CreateOrderCommand, Order, OrderHistoryRepository, OrderRepository,
};
use crate::domain::reconciliation::ReconciliationRequest;
use crate::domain::shared::ExecutionId;
use crate::error::GatewayError;
use crate::observability;

/// Use case for accepting new instructions.
pub struct SubmitInstructionUseCase<M, P, O, H, R, N>
where
    M: MarketRoutingPort,
    P: PriceOraclePort,
    O: OrderRepository,
    H: OrderHistoryRepository,
    R: ReserveRepository,
    N: NotificationPort,
{
    market: Arc<M>,
    prices: Arc<ReferencePriceService<P>>,
    lifecycle: Arc<OrderLifecycleManager<O, H, N>>,
    settlement: Arc<SettlementService<R, N>>,
    routing_timeout: Duration,
}

impl<M, P, O, H, R, N> SubmitInstructionUseCase<M, P, O, H, R, N>
where
    M: MarketRoutingPort,
    P: PriceOraclePort,
    O: OrderRepository,
    H: OrderHistoryRepository,
    R: ReserveRepository,
    N: NotificationPort,
{
    /// Create a new `SubmitInstructionUseCase`.
    pub const fn new(
        market: Arc<M>,
        prices: Arc<ReferencePriceService<P>>,
        lifecycle: Arc<OrderLifecycleManager<O, H, N>>,
        settlement: Arc<SettlementService<R, N>>,
        routing_timeout: Duration,
    ) -> Self {
        Self {
            market,
            prices,
            lifecycle,
            settlement,
            routing_timeout,
        }
    }

    /// Execute the use case. Every failure becomes a rejected response.
    pub async fn execute(&self, instruction: Instruction) -> InstructionResponse {
        let started = Instant::now();

        let valid = match instruction.validate() {
            Ok(valid) => valid,
            Err(e) => {
                observability::record_instruction_received("invalid");
                observability::record_instruction_rejection(e.code().reason());
                tracing::warn!(
                    client_order_id = %instruction.client_order_id,
                    account_id = %instruction.account_id,
                    error = %e,
                    "Instruction failed validation"
                );
                return InstructionResponse::rejected(instruction.client_order_id, &e);
            }
        };

        let trade_type = valid.trade_type.as_str();
        observability::record_instruction_received(trade_type);
        tracing::info!(
            client_order_id = %valid.client_order_id,
            account_id = %valid.account_id,
            symbol = %valid.symbol,
            trade_type,
            "Instruction received"
        );

        let response = self.process(valid).await;

        let outcome = match (response.success, response.market_order_id.is_some()) {
            (false, _) => "rejected",
            (true, true) => "routed",
            (true, false) => "cash_covered",
        };
        if let Some(code) = response.error_code {
            observability::record_instruction_rejection(code.reason());
        }
        observability::record_instruction_outcome(
            trade_type,
            outcome,
            started.elapsed().as_secs_f64(),
        );
        response
    }

    async fn process(&self, valid: ValidatedInstruction) -> InstructionResponse {
        let client_order_id = valid.client_order_id.clone();
        let _guard = self.lifecycle.lock(&client_order_id).await;

        let reference_price = self.prices.price_for(&valid.symbol).await;
        let command = CreateOrderCommand {
            client_order_id: valid.client_order_id,
            account_id: valid.account_id,
            symbol: valid.symbol,
            trade_type: valid.trade_type,
            amount: valid.amount,
            reference_price,
        };
        let mut order = match Order::new(command) {
            Ok(order) => order,
            Err(e) => {
                return InstructionResponse::rejected(client_order_id.as_str(), &GatewayError::from(e));
            }
        };

        if let Err(e) = self.lifecycle.register(&order).await {
            tracing::warn!(client_order_id = %client_order_id, error = %e, "Order not registered");
            return InstructionResponse::rejected(client_order_id.as_str(), &e);
        }

        let key = ReserveKey::new(order.account_id().clone(), order.symbol().clone());
        let request = ReconciliationRequest::for_order(&order);
        let reservation = match self.settlement.reserve(&key, &request).await {
            Ok(reservation) => reservation,
            Err(e) => {
                tracing::info!(
                    client_order_id = %client_order_id,
                    reserve = %key,
                    error = %e,
                    "Reconciliation declined instruction"
                );
                return self.abandon(order, e).await;
            }
        };

        if let Err(e) = order.record_routing(reservation.outcome.routing_decision()) {
            // Order never learned of the reservation; return it by amount.
            if let Err(rollback) = self
                .settlement
                .release_amount(&key, reservation.outcome.cash_allocated)
                .await
            {
                tracing::error!(reserve = %key, error = %rollback, "Failed to roll back reservation");
            }
            return self.abandon(order, GatewayError::internal(e.to_string())).await;
        }

        if reservation.outcome.should_route_to_market {
            self.route(order, reservation).await
        } else {
            self.cover_with_cash(order, reservation).await
        }
    }

    /// Synthesize a full fill from the reserve and archive.
    ///
    /// The fill is settled on a copy first, so a failed settlement leaves
    /// the order in `PendingNew` to be rejected.
    async fn cover_with_cash(&self, order: Order, reservation: Reservation) -> InstructionResponse {
        let mut filled = order.clone();
        if let Err(e) = filled.fill_from_reserve(ExecutionId::generate()) {
            return self.abandon(order, GatewayError::internal(e.to_string())).await;
        }

        let balance = match self.settlement.settle(&mut filled).await {
            Ok(balance) => balance.unwrap_or(reservation.balance),
            Err(e) => {
                tracing::error!(
                    client_order_id = %order.client_order_id(),
                    error = %e,
                    "Settlement of cash-covered order failed"
                );
                return self.abandon(order, e).await;
            }
        };

        let mut order = filled;
        self.finish(&mut order).await;
        tracing::info!(
            client_order_id = %order.client_order_id(),
            cash_covered = %reservation.outcome.cash_covered(),
            balance = %balance,
            "Instruction covered by cash reserve"
        );

        InstructionResponse::accepted(order.client_order_id().as_str(), "covered by cash reserve")
            .with_cash_covered(reservation.outcome.cash_covered())
            .with_reserve_balance(Some(balance))
    }

    /// Forward the routed portion to the market, bounded by the routing timeout.
    async fn route(&self, mut order: Order, reservation: Reservation) -> InstructionResponse {
        let request = MarketOrderRequest::for_order(&order);
        let timeout_ms = u64::try_from(self.routing_timeout.as_millis()).unwrap_or(u64::MAX);

        let result = match tokio::time::timeout(self.routing_timeout, self.market.submit_order(request)).await {
            Ok(result) => result,
            Err(_) => Err(MarketError::Timeout { timeout_ms }),
        };

        let ack = match result {
            Ok(ack) => ack,
            Err(e) => {
                observability::record_routing_failure("submit", e.kind());
                tracing::warn!(
                    client_order_id = %order.client_order_id(),
                    error = %e,
                    "Market routing failed"
                );
                return self.abandon(order, e.into()).await;
            }
        };

        if let Err(e) = order.mark_submitted(ack.market_order_id.clone()) {
            return self.abandon(order, GatewayError::internal(e.to_string())).await;
        }
        if let Err(e) = self.lifecycle.save(&order).await {
            return self.abandon(order, e).await;
        }
        self.lifecycle.publish(&mut order).await;

        tracing::info!(
            client_order_id = %order.client_order_id(),
            market_order_id = %ack.market_order_id,
            sent_quantity = %order.sent_quantity(),
            sent_value = %order.sent_value(),
            cash_allocated = %order.cash_allocated(),
            "Order routed to market"
        );

        InstructionResponse::accepted(order.client_order_id().as_str(), reservation.outcome.message.clone())
            .with_market_order_id(Some(ack.market_order_id.into_inner()))
            .with_cash_covered(reservation.outcome.cash_covered())
            .with_reserve_balance(Some(reservation.balance))
    }

    /// Reject, return any reservation and archive.
    async fn abandon(&self, mut order: Order, error: GatewayError) -> InstructionResponse {
        if let Err(e) = order.reject(error.message()) {
            tracing::error!(
                client_order_id = %order.client_order_id(),
                error = %e,
                "Could not mark order rejected"
            );
        }
        self.release_quietly(&mut order).await;
        self.finish(&mut order).await;
        InstructionResponse::rejected(order.client_order_id().as_str(), &error)
    }

    async fn release_quietly(&self, order: &mut Order) {
        if let Err(e) = self.settlement.release(order).await {
            tracing::error!(
                client_order_id = %order.client_order_id(),
                error = %e,
                "Failed to release reservation"
            );
        }
    }

    async fn finish(&self, order: &mut Order) {
        if let Err(e) = self.lifecycle.archive(order).await {
            tracing::error!(
                client_order_id = %order.client_order_id(),
                error = %e,
                "Failed to archive order"
            );
        }
        self.lifecycle.publish(order).await;
    }
}
