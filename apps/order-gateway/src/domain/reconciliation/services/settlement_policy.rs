//! Settlement policy: what a fill does to the reserve.
//!
//! A fill releases the order's allocation from the pending reduction and
//! moves the balance only by the per trade type adjustment. Settlement is
//! computed as a target for the order's current state and applied as the
//! difference from what was already settled, so applying it again for the
//! same state is a no-op.

use rust_decimal::Decimal;

use crate::domain::order_execution::{Order, OrderStatus, TradeType};
use crate::domain::shared::Money;

/// Cash movements still owed to the reserve for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettlementDelta {
    /// Allocation to drop from pending reduction (balance untouched).
    pub release: Money,
    /// Balance credit (positive) or debit (negative).
    pub adjust: Money,
}

impl SettlementDelta {
    /// Returns true if nothing is owed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.release.is_zero() && self.adjust.is_zero()
    }
}

/// Per trade type settlement rules.
pub struct SettlementPolicy;

impl SettlementPolicy {
    /// Amount still owed for the order's current state.
    ///
    /// Partial fills release the allocation pro rata; the balance
    /// adjustment is owed only once the order is filled.
    #[must_use]
    pub fn delta(order: &Order) -> SettlementDelta {
        let (release_target, adjustment_target) = match order.status() {
            OrderStatus::Filled => (order.cash_allocated(), Self::fill_adjustment(order)),
            OrderStatus::PartiallyFilled => (
                (order.cash_allocated() * Self::progress(order)).round(),
                order.settled_adjustment(),
            ),
            _ => (order.released_allocation(), order.settled_adjustment()),
        };

        let release = (release_target - order.released_allocation())
            .max_zero()
            .min(order.outstanding_allocation());

        SettlementDelta {
            release,
            adjust: adjustment_target - order.settled_adjustment(),
        }
    }

    /// Balance adjustment owed once the order is completely filled.
    ///
    /// Dollar trades settle `sent − executed`; a dollar sell covered by cash
    /// sent nothing, so the whole payout is debited.
    #[must_use]
    pub fn fill_adjustment(order: &Order) -> Money {
        match order.trade_type() {
            TradeType::ShareSell => Money::ZERO,
            TradeType::DollarSell | TradeType::DollarPurchase => {
                order.sent_value() - order.executed_value()
            }
            TradeType::SharePurchase => {
                if order.is_routed() {
                    Money::ZERO
                } else {
                    order.planned_adjustment()
                }
            }
        }
    }

    /// Fraction of the routed amount executed so far, in `[0, 1]`.
    fn progress(order: &Order) -> Decimal {
        let (done, sent) = if order.trade_type().is_dollar_based() {
            (order.executed_value().amount(), order.sent_value().amount())
        } else {
            (
                order.executed_quantity().amount(),
                order.sent_quantity().amount(),
            )
        };
        done.checked_div(sent)
            .unwrap_or(Decimal::ZERO)
            .clamp(Decimal::ZERO, Decimal::ONE)
    }
}
