//! Engine input.

use serde::{Deserialize, Serialize};

use crate::domain::order_execution::{InstructionAmount, Order, TradeType};
use crate::domain::shared::Money;

/// What the engine needs to know about an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationRequest {
    /// Trade type.
    pub trade_type: TradeType,
    /// Requested shares or cash value.
    pub amount: InstructionAmount,
    /// Reference price for the instrument.
    pub reference_price: Money,
}

impl ReconciliationRequest {
    /// Build a request from a freshly created order.
    #[must_use]
    pub fn for_order(order: &Order) -> Self {
        let amount = if order.trade_type().is_dollar_based() {
            InstructionAmount::Dollars(order.requested_value())
        } else {
            InstructionAmount::Shares(order.requested_quantity())
        };
        Self {
            trade_type: order.trade_type(),
            amount,
            reference_price: order.reference_price(),
        }
    }
}
