//! Market Routing Port (Driven Port)
//!
//! Interface to the execution venue. Fills arrive later as execution
//! reports, not through this port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::{InstructionAmount, Order, OrderSide};
use crate::domain::shared::{MarketOrderId, OrderId, Symbol};

/// Order forwarded to the market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderRequest {
    /// Client order ID.
    pub client_order_id: OrderId,
    /// Instrument.
    pub symbol: Symbol,
    /// Side.
    pub side: OrderSide,
    /// Shares or notional to execute.
    pub amount: InstructionAmount,
}

impl MarketOrderRequest {
    /// Build the request for an order's routing decision.
    #[must_use]
    pub fn for_order(order: &Order) -> Self {
        let amount = if order.trade_type().is_dollar_based() {
            InstructionAmount::Dollars(order.sent_value())
        } else {
            InstructionAmount::Shares(order.sent_quantity())
        };
        Self {
            client_order_id: order.client_order_id().clone(),
            symbol: order.symbol().clone(),
            side: order.trade_type().side(),
            amount,
        }
    }
}

/// Cancel forwarded to the market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketCancelRequest {
    /// Client order ID of the order to cancel.
    pub original_client_order_id: OrderId,
    /// Client order ID of the cancel request itself.
    pub cancel_client_order_id: OrderId,
    /// Market order ID, when known.
    pub market_order_id: Option<MarketOrderId>,
    /// Instrument.
    pub symbol: Symbol,
}

/// Acknowledgment from the market after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketAck {
    /// Market-assigned order ID.
    pub market_order_id: MarketOrderId,
    /// Client order ID echoed back.
    pub client_order_id: OrderId,
}

/// Market port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    /// Market declined the order.
    #[error("Order rejected by market: {reason}")]
    Rejected {
        /// Rejection reason.
        reason: String,
    },

    /// Market could not be reached.
    #[error("Market unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Market did not answer in time.
    #[error("Market did not respond within {timeout_ms}ms")]
    Timeout {
        /// Bound that expired.
        timeout_ms: u64,
    },

    /// Market does not know the order.
    #[error("Order not found at market: {order_id}")]
    OrderNotFound {
        /// The missing order ID.
        order_id: String,
    },
}

impl MarketError {
    /// Short label for metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "rejected",
            Self::Unavailable { .. } => "unavailable",
            Self::Timeout { .. } => "timeout",
            Self::OrderNotFound { .. } => "not_found",
        }
    }
}

/// Port for the execution venue.
#[async_trait]
pub trait MarketRoutingPort: Send + Sync {
    /// Submit an order.
    async fn submit_order(&self, request: MarketOrderRequest) -> Result<MarketAck, MarketError>;

    /// Forward a cancel; the outcome arrives as an execution report.
    async fn cancel_order(&self, request: MarketCancelRequest) -> Result<(), MarketError>;
}
