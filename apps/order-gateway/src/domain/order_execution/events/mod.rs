//! Domain events for order execution.
//!
//! Events are collected on the [`Order`](super::Order) aggregate and drained
//! by the application layer for the notification port.

use serde::{Deserialize, Serialize};

use super::value_objects::{InstructionAmount, OrderStatus, TradeType};
use crate::domain::shared::{
    AccountId, ExecutionId, MarketOrderId, Money, OrderId, Quantity, Symbol, Timestamp,
};

/// All possible order events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    /// Instruction accepted into the registry.
    Received(OrderReceived),
    /// Order acknowledged by the market.
    Routed(OrderRouted),
    /// Order covered entirely by the cash reserve.
    CoveredByCash(OrderCoveredByCash),
    /// Execution report applied.
    Executed(OrderExecuted),
    /// Order completely filled.
    Filled(OrderFilled),
    /// Cancel forwarded to the market.
    CancelRequested(OrderCancelRequested),
    /// Order canceled.
    Canceled(OrderCanceled),
    /// Order rejected.
    Rejected(OrderRejected),
}

impl OrderEvent {
    /// Get the order ID for this event.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        match self {
            Self::Received(e) => &e.order_id,
            Self::Routed(e) => &e.order_id,
            Self::CoveredByCash(e) => &e.order_id,
            Self::Executed(e) => &e.order_id,
            Self::Filled(e) => &e.order_id,
            Self::CancelRequested(e) => &e.order_id,
            Self::Canceled(e) => &e.order_id,
            Self::Rejected(e) => &e.order_id,
        }
    }

    /// Get the timestamp when this event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> Timestamp {
        match self {
            Self::Received(e) => e.occurred_at,
            Self::Routed(e) => e.occurred_at,
            Self::CoveredByCash(e) => e.occurred_at,
            Self::Executed(e) => e.occurred_at,
            Self::Filled(e) => e.occurred_at,
            Self::CancelRequested(e) => e.occurred_at,
            Self::Canceled(e) => e.occurred_at,
            Self::Rejected(e) => e.occurred_at,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Received(_) => "ORDER_RECEIVED",
            Self::Routed(_) => "ORDER_ROUTED",
            Self::CoveredByCash(_) => "ORDER_COVERED_BY_CASH",
            Self::Executed(_) => "ORDER_EXECUTED",
            Self::Filled(_) => "ORDER_FILLED",
            Self::CancelRequested(_) => "ORDER_CANCEL_REQUESTED",
            Self::Canceled(_) => "ORDER_CANCELED",
            Self::Rejected(_) => "ORDER_REJECTED",
        }
    }
}

/// Event: instruction accepted into the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceived {
    /// Order ID.
    pub order_id: OrderId,
    /// Account.
    pub account_id: AccountId,
    /// Instrument.
    pub symbol: Symbol,
    /// Trade type.
    pub trade_type: TradeType,
    /// Requested amount.
    pub amount: InstructionAmount,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order acknowledged by the market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRouted {
    /// Order ID.
    pub order_id: OrderId,
    /// Market-assigned order ID.
    pub market_order_id: MarketOrderId,
    /// Quantity sent to the market.
    pub sent_quantity: Quantity,
    /// Value sent to the market.
    pub sent_value: Money,
    /// Cash reserved against the order.
    pub cash_allocated: Money,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order covered by the cash reserve without market routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCoveredByCash {
    /// Order ID.
    pub order_id: OrderId,
    /// Quantity filled by the reserve.
    pub quantity: Quantity,
    /// Value filled by the reserve.
    pub value: Money,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: execution report applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderExecuted {
    /// Order ID.
    pub order_id: OrderId,
    /// Execution ID.
    pub execution_id: ExecutionId,
    /// Status after the report.
    pub status: OrderStatus,
    /// Last fill quantity.
    pub last_quantity: Quantity,
    /// Last fill price.
    pub last_price: Money,
    /// Cumulative executed quantity.
    pub cumulative_quantity: Quantity,
    /// Cumulative executed value.
    pub cumulative_value: Money,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order completely filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilled {
    /// Order ID.
    pub order_id: OrderId,
    /// Total executed quantity.
    pub executed_quantity: Quantity,
    /// Total executed value.
    pub executed_value: Money,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: cancel forwarded to the market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelRequested {
    /// Order ID.
    pub order_id: OrderId,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order canceled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCanceled {
    /// Order ID.
    pub order_id: OrderId,
    /// Reason for cancellation.
    pub reason: String,
    /// Quantity executed before cancellation.
    pub executed_quantity: Quantity,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRejected {
    /// Order ID.
    pub order_id: OrderId,
    /// Rejection reason.
    pub reason: String,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}
