//! Minimum trade size for share purchases.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::shared::{Money, Quantity};

/// Share purchases at or below either threshold are filled from the reserve.
///
/// Fixed for every account; candidate for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumTradePolicy {
    /// Value a purchase must exceed to be routed.
    pub min_value: Money,
    /// Quantity a purchase must exceed to be routed.
    pub min_quantity: Quantity,
}

impl MinimumTradePolicy {
    /// Value threshold.
    pub const MIN_VALUE: Decimal = dec!(50.00);
    /// Quantity threshold.
    pub const MIN_QUANTITY: Decimal = dec!(0.5);

    /// Returns true if the purchase is large enough for the market.
    #[must_use]
    pub fn should_route(&self, quantity: Quantity, value: Money) -> bool {
        value > self.min_value && quantity > self.min_quantity
    }
}

impl Default for MinimumTradePolicy {
    fn default() -> Self {
        Self {
            min_value: Money::new(Self::MIN_VALUE),
            min_quantity: Quantity::new(Self::MIN_QUANTITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(dec!(0.3), dec!(30), false ; "small value and quantity")]
    #[test_case(dec!(1), dec!(50), false ; "value at threshold")]
    #[test_case(dec!(0.5), dec!(60), false ; "quantity at threshold")]
    #[test_case(dec!(0.6), dec!(60), true ; "both above")]
    fn routes_only_above_both_thresholds(qty: Decimal, value: Decimal, expected: bool) {
        let policy = MinimumTradePolicy::default();
        assert_eq!(
            policy.should_route(Quantity::new(qty), Money::new(value)),
            expected
        );
    }
}
