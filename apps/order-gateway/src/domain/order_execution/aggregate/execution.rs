//! Execution (fill) records.

use serde::{Deserialize, Serialize};

use crate::domain::order_execution::value_objects::OrderSide;
use crate::domain::shared::{ExecutionId, Money, Quantity, Timestamp};

/// One fill against an order, from the market or from the cash reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// Execution ID.
    pub id: ExecutionId,
    /// Filled quantity.
    pub quantity: Quantity,
    /// Fill price.
    pub price: Money,
    /// Side of the fill.
    pub side: OrderSide,
    /// When the fill happened.
    pub executed_at: Timestamp,
}
