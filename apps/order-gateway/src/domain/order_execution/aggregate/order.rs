//! Order Aggregate Root
//!
//! An `Order` is created when an instruction is accepted, records the
//! routing decision, absorbs execution reports and tracks how much of its
//! cash allocation has been settled against the reserve.

use serde::{Deserialize, Serialize};

use super::Execution;
use crate::domain::order_execution::errors::OrderError;
use crate::domain::order_execution::events::{
    OrderCancelRequested, OrderCanceled, OrderCoveredByCash, OrderEvent, OrderExecuted,
    OrderFilled, OrderReceived, OrderRejected, OrderRouted,
};
use crate::domain::order_execution::services::OrderStateMachine;
use crate::domain::order_execution::value_objects::{
    ExecutionReport, InstructionAmount, OrderStatus, RoutingDecision, TradeType,
};
use crate::domain::shared::{
    AccountId, ExecutionId, MarketOrderId, Money, OrderId, Quantity, Symbol, Timestamp,
};

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Client-assigned order ID.
    pub client_order_id: OrderId,
    /// Account placing the order.
    pub account_id: AccountId,
    /// Instrument.
    pub symbol: Symbol,
    /// Trade type.
    pub trade_type: TradeType,
    /// Requested shares or cash value.
    pub amount: InstructionAmount,
    /// Reference price for the instrument.
    pub reference_price: Money,
}

impl CreateOrderCommand {
    /// Validate the command parameters.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol, amount or price is invalid, or the amount
    /// basis does not match the trade type.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.client_order_id.as_str().is_empty() {
            return Err(OrderError::invalid(
                "client_order_id",
                "Client order ID cannot be empty",
            ));
        }
        if self.account_id.as_str().is_empty() {
            return Err(OrderError::invalid("account_id", "Account ID cannot be empty"));
        }
        self.symbol.validate()?;

        match (self.trade_type.is_dollar_based(), &self.amount) {
            (true, InstructionAmount::Dollars(value)) => value.validate_for_order()?,
            (false, InstructionAmount::Shares(quantity)) => quantity.validate_for_order()?,
            _ => {
                return Err(OrderError::invalid(
                    "amount",
                    format!("Amount basis does not match trade type {}", self.trade_type),
                ));
            }
        }

        if !self.reference_price.is_positive() {
            return Err(OrderError::invalid(
                "reference_price",
                "Reference price must be positive",
            ));
        }
        Ok(())
    }
}

/// Order Aggregate Root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    client_order_id: OrderId,
    market_order_id: Option<MarketOrderId>,
    account_id: AccountId,
    symbol: Symbol,
    trade_type: TradeType,
    reference_price: Money,
    requested_quantity: Quantity,
    requested_value: Money,
    routing: Option<RoutingDecision>,
    executed_quantity: Quantity,
    executed_value: Money,
    settled_adjustment: Money,
    released_allocation: Money,
    executions: Vec<Execution>,
    status: OrderStatus,
    notes: Vec<String>,
    created_at: Timestamp,
    submitted_at: Option<Timestamp>,
    last_execution_at: Option<Timestamp>,
    cancel_requested_at: Option<Timestamp>,
    /// Domain events (not persisted, collected for publishing).
    #[serde(skip)]
    events: Vec<OrderEvent>,
}

impl Order {
    /// Create a new order in `PendingNew`.
    ///
    /// For share-based trades the requested value is `quantity × price`;
    /// for dollar-based trades the requested quantity is implied at the
    /// reference price.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails validation or the requested value
    /// overflows.
    pub fn new(cmd: CreateOrderCommand) -> Result<Self, OrderError> {
        cmd.validate()?;

        let (requested_quantity, requested_value) = match cmd.amount {
            InstructionAmount::Shares(quantity) => {
                let value = quantity.checked_value(cmd.reference_price).ok_or_else(|| {
                    OrderError::invalid("quantity", "Order value exceeds the supported range")
                })?;
                (quantity, value)
            }
            InstructionAmount::Dollars(value) => {
                (Quantity::implied(value, cmd.reference_price), value)
            }
        };

        let now = Timestamp::now();
        let mut order = Self {
            client_order_id: cmd.client_order_id.clone(),
            market_order_id: None,
            account_id: cmd.account_id.clone(),
            symbol: cmd.symbol.clone(),
            trade_type: cmd.trade_type,
            reference_price: cmd.reference_price,
            requested_quantity,
            requested_value,
            routing: None,
            executed_quantity: Quantity::ZERO,
            executed_value: Money::ZERO,
            settled_adjustment: Money::ZERO,
            released_allocation: Money::ZERO,
            executions: Vec::new(),
            status: OrderStatus::PendingNew,
            notes: Vec::new(),
            created_at: now,
            submitted_at: None,
            last_execution_at: None,
            cancel_requested_at: None,
            events: Vec::new(),
        };

        order.events.push(OrderEvent::Received(OrderReceived {
            order_id: cmd.client_order_id,
            account_id: cmd.account_id,
            symbol: cmd.symbol,
            trade_type: cmd.trade_type,
            amount: cmd.amount,
            occurred_at: now,
        }));

        Ok(order)
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the client order ID.
    #[must_use]
    pub const fn client_order_id(&self) -> &OrderId {
        &self.client_order_id
    }

    /// Get the market order ID, once routed.
    #[must_use]
    pub const fn market_order_id(&self) -> Option<&MarketOrderId> {
        self.market_order_id.as_ref()
    }

    /// Get the account ID.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Get the symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Get the trade type.
    #[must_use]
    pub const fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    /// Reference price used for the routing decision.
    #[must_use]
    pub const fn reference_price(&self) -> Money {
        self.reference_price
    }

    /// Requested share quantity (implied for dollar-based trades).
    #[must_use]
    pub const fn requested_quantity(&self) -> Quantity {
        self.requested_quantity
    }

    /// Requested value (implied for share-based trades).
    #[must_use]
    pub const fn requested_value(&self) -> Money {
        self.requested_value
    }

    /// Routing decision, once recorded.
    #[must_use]
    pub const fn routing(&self) -> Option<&RoutingDecision> {
        self.routing.as_ref()
    }

    /// Returns true if any part of the order was routed to the market.
    #[must_use]
    pub fn is_routed(&self) -> bool {
        self.routing.is_some_and(|r| r.route_to_market)
    }

    /// Quantity sent to the market.
    #[must_use]
    pub fn sent_quantity(&self) -> Quantity {
        self.routing.map_or(Quantity::ZERO, |r| r.sent_quantity)
    }

    /// Value sent to the market.
    #[must_use]
    pub fn sent_value(&self) -> Money {
        self.routing.map_or(Money::ZERO, |r| r.sent_value)
    }

    /// Cash reserved against this order.
    #[must_use]
    pub fn cash_allocated(&self) -> Money {
        self.routing.map_or(Money::ZERO, |r| r.cash_allocated)
    }

    /// Balance adjustment planned at routing time.
    #[must_use]
    pub fn planned_adjustment(&self) -> Money {
        self.routing.map_or(Money::ZERO, |r| r.cash_adjustment)
    }

    /// Cumulative executed quantity.
    #[must_use]
    pub const fn executed_quantity(&self) -> Quantity {
        self.executed_quantity
    }

    /// Cumulative executed value.
    #[must_use]
    pub const fn executed_value(&self) -> Money {
        self.executed_value
    }

    /// Allocation already returned from pending reduction.
    #[must_use]
    pub const fn released_allocation(&self) -> Money {
        self.released_allocation
    }

    /// Adjustment already applied to the reserve balance.
    #[must_use]
    pub const fn settled_adjustment(&self) -> Money {
        self.settled_adjustment
    }

    /// Allocation still held as pending reduction.
    #[must_use]
    pub fn outstanding_allocation(&self) -> Money {
        (self.cash_allocated() - self.released_allocation).max_zero()
    }

    /// Fills in arrival order.
    #[must_use]
    pub fn executions(&self) -> &[Execution] {
        &self.executions
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Diagnostic notes.
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// When the market acknowledged the order.
    #[must_use]
    pub const fn submitted_at(&self) -> Option<Timestamp> {
        self.submitted_at
    }

    /// When the last execution was applied.
    #[must_use]
    pub const fn last_execution_at(&self) -> Option<Timestamp> {
        self.last_execution_at
    }

    /// Returns true if a cancel has been forwarded to the market.
    #[must_use]
    pub const fn cancel_requested(&self) -> bool {
        self.cancel_requested_at.is_some()
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Record how the instruction is split between the market and the reserve.
    ///
    /// # Errors
    ///
    /// Returns error if the order already left `PendingNew` or a decision
    /// was already recorded.
    pub fn record_routing(&mut self, decision: RoutingDecision) -> Result<(), OrderError> {
        if self.status != OrderStatus::PendingNew || self.routing.is_some() {
            return Err(OrderError::invalid(
                "routing",
                format!("Routing already decided for order in status {}", self.status),
            ));
        }
        self.routing = Some(decision);
        Ok(())
    }

    /// Fill the whole order from the cash reserve.
    ///
    /// # Errors
    ///
    /// Returns error if the order was routed to the market or is not `PendingNew`.
    pub fn fill_from_reserve(&mut self, execution_id: ExecutionId) -> Result<(), OrderError> {
        if self.routing.is_none() || self.is_routed() {
            return Err(OrderError::invalid(
                "routing",
                "Only orders kept off the market can be filled from the reserve",
            ));
        }
        OrderStateMachine::validate_transition(self.status, OrderStatus::Filled)?;

        let now = Timestamp::now();
        self.executions.push(Execution {
            id: execution_id,
            quantity: self.requested_quantity,
            price: self.reference_price,
            side: self.trade_type.side(),
            executed_at: now,
        });
        self.executed_quantity = self.requested_quantity;
        self.executed_value = self.requested_value;
        self.last_execution_at = Some(now);
        self.status = OrderStatus::Filled;

        self.events.push(OrderEvent::CoveredByCash(OrderCoveredByCash {
            order_id: self.client_order_id.clone(),
            quantity: self.requested_quantity,
            value: self.requested_value,
            occurred_at: now,
        }));
        self.events.push(OrderEvent::Filled(OrderFilled {
            order_id: self.client_order_id.clone(),
            executed_quantity: self.executed_quantity,
            executed_value: self.executed_value,
            occurred_at: now,
        }));

        Ok(())
    }

    /// Mark the order as acknowledged by the market.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not routed or not in `PendingNew`.
    pub fn mark_submitted(&mut self, market_order_id: MarketOrderId) -> Result<(), OrderError> {
        if !self.is_routed() {
            return Err(OrderError::invalid(
                "routing",
                "Order has no market routing decision",
            ));
        }
        if self.status != OrderStatus::PendingNew {
            return Err(OrderError::InvalidStateTransition {
                from: self.status,
                to: OrderStatus::New,
                reason: OrderStateMachine::transition_error_reason(self.status, OrderStatus::New),
            });
        }

        let now = Timestamp::now();
        self.market_order_id = Some(market_order_id.clone());
        self.submitted_at = Some(now);
        self.status = OrderStatus::New;

        self.events.push(OrderEvent::Routed(OrderRouted {
            order_id: self.client_order_id.clone(),
            market_order_id,
            sent_quantity: self.sent_quantity(),
            sent_value: self.sent_value(),
            cash_allocated: self.cash_allocated(),
            occurred_at: now,
        }));

        Ok(())
    }

    /// Apply an execution report from the market.
    ///
    /// Returns the status the order had before the report.
    ///
    /// # Errors
    ///
    /// Returns error if the order is terminal, the execution was already
    /// applied, the status code is unrecognized, the cumulative value
    /// overflows, or the transition is invalid. The order is unchanged on
    /// error.
    pub fn apply_execution_report(
        &mut self,
        report: &ExecutionReport,
    ) -> Result<OrderStatus, OrderError> {
        if self.status.is_terminal() {
            return Err(OrderError::AlreadyTerminal {
                order_id: self.client_order_id.to_string(),
                status: self.status,
            });
        }
        if self.executions.iter().any(|e| e.id == report.execution_id) {
            return Err(OrderError::DuplicateExecution {
                order_id: self.client_order_id.to_string(),
                execution_id: report.execution_id.to_string(),
            });
        }
        let target = report.status().ok_or_else(|| OrderError::UnknownStatusCode {
            order_id: self.client_order_id.to_string(),
            code: report.status_code.clone(),
        })?;
        OrderStateMachine::validate_transition(self.status, target)?;
        let cumulative_value = report.cumulative_value().ok_or_else(|| {
            OrderError::invalid("cumulative_value", "Reported fill value exceeds the supported range")
        })?;

        let previous = self.status;
        let now = Timestamp::now();

        if report.has_fill() {
            self.executions.push(Execution {
                id: report.execution_id.clone(),
                quantity: report.last_quantity,
                price: report.last_price,
                side: self.trade_type.side(),
                executed_at: report.transact_time,
            });
            self.last_execution_at = Some(report.transact_time);
        }

        // Cumulative fields never move backwards on a stale report.
        if report.cumulative_quantity >= self.executed_quantity {
            self.executed_quantity = report.cumulative_quantity;
            self.executed_value = cumulative_value;
        }
        if self.market_order_id.is_none() {
            self.market_order_id.clone_from(&report.market_order_id);
        }
        self.status = target;

        self.events.push(OrderEvent::Executed(OrderExecuted {
            order_id: self.client_order_id.clone(),
            execution_id: report.execution_id.clone(),
            status: target,
            last_quantity: report.last_quantity,
            last_price: report.last_price,
            cumulative_quantity: self.executed_quantity,
            cumulative_value: self.executed_value,
            occurred_at: now,
        }));

        match target {
            OrderStatus::Filled => self.events.push(OrderEvent::Filled(OrderFilled {
                order_id: self.client_order_id.clone(),
                executed_quantity: self.executed_quantity,
                executed_value: self.executed_value,
                occurred_at: now,
            })),
            OrderStatus::Canceled => self.push_canceled("Canceled by market".to_string(), now),
            OrderStatus::Rejected => self.push_rejected("Rejected by market".to_string(), now),
            OrderStatus::PendingNew | OrderStatus::New | OrderStatus::PartiallyFilled => {}
        }

        Ok(previous)
    }

    /// Reject the order.
    ///
    /// # Errors
    ///
    /// Returns error if the order cannot move to `Rejected`.
    pub fn reject(&mut self, reason: impl Into<String>) -> Result<(), OrderError> {
        OrderStateMachine::validate_transition(self.status, OrderStatus::Rejected)?;
        self.status = OrderStatus::Rejected;
        self.push_rejected(reason.into(), Timestamp::now());
        Ok(())
    }

    /// Cancel an order that never reached the market.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not in `PendingNew`.
    pub fn cancel_unsubmitted(&mut self, reason: impl Into<String>) -> Result<(), OrderError> {
        if self.status != OrderStatus::PendingNew {
            return Err(OrderError::CannotCancel {
                status: self.status,
            });
        }
        self.status = OrderStatus::Canceled;
        self.push_canceled(reason.into(), Timestamp::now());
        Ok(())
    }

    /// Record that a cancel was forwarded to the market.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not working at the market.
    pub fn request_cancel(&mut self) -> Result<(), OrderError> {
        if !self.status.is_working() {
            return Err(OrderError::CannotCancel {
                status: self.status,
            });
        }
        let now = Timestamp::now();
        self.cancel_requested_at = Some(now);
        self.notes.push("Cancel requested".to_string());
        self.events
            .push(OrderEvent::CancelRequested(OrderCancelRequested {
                order_id: self.client_order_id.clone(),
                occurred_at: now,
            }));
        Ok(())
    }

    /// Record allocation released and adjustment applied by a settlement step.
    pub fn record_settlement(&mut self, released: Money, adjustment: Money) {
        self.released_allocation += released;
        self.settled_adjustment += adjustment;
    }

    /// Record allocation returned to the reserve on cancel or rejection.
    pub fn record_release(&mut self, released: Money) {
        self.released_allocation += released;
    }

    /// Append a diagnostic note.
    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Drain all pending domain events.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_rejected(&mut self, reason: String, at: Timestamp) {
        self.notes.push(reason.clone());
        self.events.push(OrderEvent::Rejected(OrderRejected {
            order_id: self.client_order_id.clone(),
            reason,
            occurred_at: at,
        }));
    }

    fn push_canceled(&mut self, reason: String, at: Timestamp) {
        self.notes.push(reason.clone());
        self.events.push(OrderEvent::Canceled(OrderCanceled {
            order_id: self.client_order_id.clone(),
            reason,
            executed_quantity: self.executed_quantity,
            occurred_at: at,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn command(trade_type: TradeType, amount: InstructionAmount) -> CreateOrderCommand {
        CreateOrderCommand {
            client_order_id: OrderId::new("ord-1"),
            account_id: AccountId::new("ACC-1"),
            symbol: Symbol::new("AAPL"),
            trade_type,
            amount,
            reference_price: Money::new(dec!(10.00)),
        }
    }

    fn share_sell(qty: Decimal) -> Order {
        Order::new(command(
            TradeType::ShareSell,
            InstructionAmount::Shares(Quantity::new(qty)),
        ))
        .unwrap()
    }

    fn routed(qty: Decimal) -> RoutingDecision {
        RoutingDecision {
            route_to_market: true,
            sent_quantity: Quantity::new(qty),
            sent_value: Money::new(qty * dec!(10.00)),
            cash_allocated: Money::ZERO,
            cash_adjustment: Money::ZERO,
        }
    }

    fn report(id: &str, code: &str, cum: Decimal, last: Decimal, px: Decimal) -> ExecutionReport {
        ExecutionReport {
            client_order_id: OrderId::new("ord-1"),
            market_order_id: Some(MarketOrderId::new("MKT-1")),
            execution_id: ExecutionId::new(id),
            status_code: code.to_string(),
            cumulative_quantity: Quantity::new(cum),
            last_quantity: Quantity::new(last),
            last_price: Money::new(px),
            average_price: Money::new(px),
            transact_time: Timestamp::now(),
        }
    }

    fn working_order() -> Order {
        let mut order = share_sell(dec!(10));
        order.record_routing(routed(dec!(10))).unwrap();
        order.mark_submitted(MarketOrderId::new("MKT-1")).unwrap();
        order.drain_events();
        order
    }

    #[test]
    fn new_order_is_pending_with_received_event() {
        let mut order = share_sell(dec!(10.25));
        assert_eq!(order.status(), OrderStatus::PendingNew);
        assert_eq!(order.requested_value().amount(), dec!(102.50));
        assert!(matches!(order.drain_events().as_slice(), [OrderEvent::Received(_)]));
    }

    #[test]
    fn dollar_order_implies_quantity() {
        let order = Order::new(command(
            TradeType::DollarPurchase,
            InstructionAmount::Dollars(Money::new(dec!(25))),
        ))
        .unwrap();
        assert_eq!(order.requested_quantity().amount(), dec!(2.5));
    }

    #[test]
    fn mismatched_amount_basis_is_invalid() {
        let result = Order::new(command(
            TradeType::DollarSell,
            InstructionAmount::Shares(Quantity::new(dec!(3))),
        ));
        assert!(matches!(result, Err(OrderError::InvalidParameters { .. })));
    }

    #[test]
    fn zero_quantity_is_invalid() {
        let result = Order::new(command(
            TradeType::ShareSell,
            InstructionAmount::Shares(Quantity::ZERO),
        ));
        assert!(matches!(result, Err(OrderError::Domain(_))));
    }

    #[test]
    fn fill_from_reserve_completes_order() {
        let mut order = share_sell(dec!(0.25));
        order
            .record_routing(RoutingDecision {
                cash_allocated: Money::new(dec!(2.50)),
                ..RoutingDecision::default()
            })
            .unwrap();
        order.fill_from_reserve(ExecutionId::new("cash-1")).unwrap();

        assert_eq!(order.status(), OrderStatus::Filled);
        assert_eq!(order.executed_value().amount(), dec!(2.50));
        assert_eq!(order.executions().len(), 1);
    }

    #[test]
    fn fill_from_reserve_refused_for_routed_order() {
        let mut order = share_sell(dec!(10));
        order.record_routing(routed(dec!(10))).unwrap();
        assert!(order.fill_from_reserve(ExecutionId::new("cash-1")).is_err());
    }

    #[test]
    fn routing_can_only_be_recorded_once() {
        let mut order = share_sell(dec!(10));
        order.record_routing(routed(dec!(10))).unwrap();
        assert!(order.record_routing(routed(dec!(10))).is_err());
    }

    #[test]
    fn mark_submitted_moves_to_new() {
        let order = working_order();
        assert_eq!(order.status(), OrderStatus::New);
        assert_eq!(order.market_order_id().unwrap().as_str(), "MKT-1");
        assert!(order.submitted_at().is_some());
    }

    #[test]
    fn reports_use_cumulative_fields() {
        let mut order = working_order();
        order
            .apply_execution_report(&report("e1", "1", dec!(4), dec!(4), dec!(10)))
            .unwrap();
        order
            .apply_execution_report(&report("e2", "2", dec!(10), dec!(6), dec!(10)))
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Filled);
        assert_eq!(order.executed_quantity().amount(), dec!(10));
        assert_eq!(order.executed_value().amount(), dec!(100));
        assert_eq!(order.executions().len(), 2);
    }

    #[test]
    fn duplicate_execution_is_refused() {
        let mut order = working_order();
        let fill = report("e1", "1", dec!(4), dec!(4), dec!(10));
        order.apply_execution_report(&fill).unwrap();
        let err = order.apply_execution_report(&fill).unwrap_err();
        assert!(matches!(err, OrderError::DuplicateExecution { .. }));
        assert_eq!(order.executions().len(), 1);
    }

    #[test]
    fn unknown_status_leaves_order_unchanged() {
        let mut order = working_order();
        let err = order
            .apply_execution_report(&report("e1", "Z", dec!(4), dec!(4), dec!(10)))
            .unwrap_err();
        assert!(matches!(err, OrderError::UnknownStatusCode { .. }));
        assert_eq!(order.status(), OrderStatus::New);
        assert!(order.executed_quantity().is_zero());
    }

    #[test]
    fn terminal_order_refuses_reports() {
        let mut order = working_order();
        order
            .apply_execution_report(&report("e1", "4", dec!(0), dec!(0), dec!(0)))
            .unwrap();
        let err = order
            .apply_execution_report(&report("e2", "2", dec!(10), dec!(10), dec!(10)))
            .unwrap_err();
        assert!(matches!(err, OrderError::AlreadyTerminal { .. }));
        assert_eq!(order.status(), OrderStatus::Canceled);
    }

    #[test]
    fn request_cancel_marks_order() {
        let mut order = working_order();
        order.request_cancel().unwrap();
        assert!(order.cancel_requested());
        assert!(matches!(
            order.drain_events().as_slice(),
            [OrderEvent::CancelRequested(_)]
        ));
    }

    #[test]
    fn cancel_unsubmitted_only_from_pending_new() {
        let mut pending = share_sell(dec!(1));
        pending.cancel_unsubmitted("user request").unwrap();
        assert_eq!(pending.status(), OrderStatus::Canceled);

        let mut working = working_order();
        assert!(matches!(
            working.cancel_unsubmitted("user request"),
            Err(OrderError::CannotCancel { .. })
        ));
    }

    #[test]
    fn reject_records_note() {
        let mut order = share_sell(dec!(1));
        order.reject("market unavailable").unwrap();
        assert_eq!(order.status(), OrderStatus::Rejected);
        assert_eq!(order.notes(), ["market unavailable".to_string()]);
    }

    #[test]
    fn outstanding_allocation_tracks_settlement_and_release() {
        let mut order = share_sell(dec!(10.25));
        order
            .record_routing(RoutingDecision {
                cash_allocated: Money::new(dec!(2.50)),
                ..routed(dec!(10))
            })
            .unwrap();
        order.record_settlement(Money::new(dec!(1.00)), Money::ZERO);
        assert_eq!(order.outstanding_allocation().amount(), dec!(1.50));
        order.record_release(Money::new(dec!(1.50)));
        assert!(order.outstanding_allocation().is_zero());
        assert_eq!(order.released_allocation().amount(), dec!(2.50));
    }

    #[test]
    fn order_serde_skips_events() {
        let order = share_sell(dec!(2));
        let json = serde_json::to_string(&order).unwrap();
        let mut parsed: Order = serde_json::from_str(&json).unwrap();
        assert!(parsed.drain_events().is_empty());
        assert_eq!(parsed.client_order_id(), order.client_order_id());
    }
}
