//! How an accepted instruction is split between the market and the reserve.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, Quantity};

/// Routing decision recorded on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Whether any part of the order goes to the market.
    pub route_to_market: bool,
    /// Quantity forwarded to the market.
    pub sent_quantity: Quantity,
    /// Value forwarded to the market.
    pub sent_value: Money,
    /// Cash reserved against the order.
    pub cash_allocated: Money,
    /// Balance adjustment to apply once the order fills.
    pub cash_adjustment: Money,
}
