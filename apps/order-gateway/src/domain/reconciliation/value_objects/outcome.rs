//! Engine output.

use serde::{Deserialize, Serialize};

use crate::domain::order_execution::RoutingDecision;
use crate::domain::shared::{Money, Quantity};

/// Successful reconciliation result.
///
/// A declined instruction is a [`ReconciliationError`](crate::domain::reconciliation::ReconciliationError),
/// so every outcome is a success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    /// Whether any part of the order goes to the market.
    pub should_route_to_market: bool,
    /// Cash reserved against the order.
    pub cash_allocated: Money,
    /// Balance adjustment to apply when the order fills.
    pub cash_adjustment: Money,
    /// Quantity forwarded to the market.
    pub sent_quantity: Quantity,
    /// Value forwarded to the market.
    pub sent_value: Money,
    /// Human-readable summary.
    pub message: String,
}

impl ReconciliationOutcome {
    /// Decision to record on the order.
    #[must_use]
    pub const fn routing_decision(&self) -> RoutingDecision {
        RoutingDecision {
            route_to_market: self.should_route_to_market,
            sent_quantity: self.sent_quantity,
            sent_value: self.sent_value,
            cash_allocated: self.cash_allocated,
            cash_adjustment: self.cash_adjustment,
        }
    }

    /// Cash the reserve contributes to the instruction.
    #[must_use]
    pub fn cash_covered(&self) -> Money {
        self.cash_allocated + self.cash_adjustment.max_zero()
    }
}
