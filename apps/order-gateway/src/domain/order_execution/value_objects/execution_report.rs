//! Execution report received from the market.

use serde::{Deserialize, Serialize};

use super::OrderStatus;
use crate::domain::shared::{ExecutionId, MarketOrderId, Money, OrderId, Quantity, Timestamp};

/// An execution report for one order.
///
/// Cumulative fields are authoritative: the order's executed quantity and
/// value are taken from them rather than summed from individual fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Client order id the report refers to.
    pub client_order_id: OrderId,
    /// Market-assigned order id, when present.
    pub market_order_id: Option<MarketOrderId>,
    /// Unique id of this report.
    pub execution_id: ExecutionId,
    /// Raw order status code (FIX tag 39).
    pub status_code: String,
    /// Cumulative executed quantity.
    pub cumulative_quantity: Quantity,
    /// Quantity of the last fill.
    pub last_quantity: Quantity,
    /// Price of the last fill.
    pub last_price: Money,
    /// Average price across all fills.
    pub average_price: Money,
    /// When the market produced the report.
    pub transact_time: Timestamp,
}

impl ExecutionReport {
    /// Status mapped from the raw code, `None` when unrecognized.
    #[must_use]
    pub fn status(&self) -> Option<OrderStatus> {
        OrderStatus::from_fix_code(&self.status_code)
    }

    /// Cumulative executed value (`cumulative_quantity × average_price`),
    /// or `None` if it overflows.
    #[must_use]
    pub fn cumulative_value(&self) -> Option<Money> {
        self.cumulative_quantity.checked_value(self.average_price)
    }

    /// Returns true if the report carries a new fill.
    #[must_use]
    pub fn has_fill(&self) -> bool {
        self.last_quantity.is_positive()
    }
}
