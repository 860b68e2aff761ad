//! Reconciliation Engine
//!
//! Splits an instruction between the market and the cash reserve. The only
//! reserve field it touches is the pending reduction; balances change on
//! settlement.

use crate::domain::cash_reserve::CashReserve;
use crate::domain::order_execution::{InstructionAmount, TradeType};
use crate::domain::reconciliation::errors::ReconciliationError;
use crate::domain::reconciliation::value_objects::{
    MinimumTradePolicy, ReconciliationOutcome, ReconciliationRequest,
};
use crate::domain::shared::{Money, Quantity};

/// Reconciliation engine with one policy per trade type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationEngine {
    minimum_trade: MinimumTradePolicy,
}

impl ReconciliationEngine {
    /// Create an engine with a minimum trade policy.
    #[must_use]
    pub const fn new(minimum_trade: MinimumTradePolicy) -> Self {
        Self { minimum_trade }
    }

    /// Decide routing for an instruction, reserving cash on success.
    ///
    /// # Errors
    ///
    /// Returns error if the reserve cannot cover the cash portion, or the
    /// request is malformed. The reserve is unchanged on error.
    pub fn reconcile(
        &self,
        reserve: &mut CashReserve,
        request: &ReconciliationRequest,
    ) -> Result<ReconciliationOutcome, ReconciliationError> {
        let price = request.reference_price;
        if !price.is_positive() {
            return Err(ReconciliationError::InvalidPrice(price));
        }

        match (request.trade_type, request.amount) {
            (TradeType::ShareSell, InstructionAmount::Shares(quantity)) => {
                Self::share_sell(reserve, quantity, price)
            }
            (TradeType::DollarSell, InstructionAmount::Dollars(value)) => {
                Self::dollar_sell(reserve, value, price)
            }
            (TradeType::SharePurchase, InstructionAmount::Shares(quantity)) => {
                self.share_purchase(quantity, price)
            }
            (TradeType::DollarPurchase, InstructionAmount::Dollars(value)) => {
                Self::dollar_purchase(reserve, value, price)
            }
            (trade_type, _) => Err(ReconciliationError::AmountMismatch { trade_type }),
        }
    }

    /// Whole shares go to the market, the fractional remainder is bought
    /// by the reserve.
    fn share_sell(
        reserve: &mut CashReserve,
        quantity: Quantity,
        price: Money,
    ) -> Result<ReconciliationOutcome, ReconciliationError> {
        let whole = quantity.whole();
        let remainder = quantity.fraction();
        let whole_value = whole
            .checked_value(price)
            .ok_or(ReconciliationError::AmountOverflow("share sell value"))?;

        if remainder.is_zero() {
            return Ok(ReconciliationOutcome {
                should_route_to_market: true,
                cash_allocated: Money::ZERO,
                cash_adjustment: Money::ZERO,
                sent_quantity: whole,
                sent_value: whole_value,
                message: format!("Routed {whole} shares to market"),
            });
        }

        let fractional_value = remainder
            .checked_value(price)
            .ok_or(ReconciliationError::AmountOverflow("fractional value"))?;
        let available = reserve.available();
        if available < fractional_value {
            return Err(ReconciliationError::InsufficientCash {
                required: fractional_value,
                available,
            });
        }
        reserve.reserve(fractional_value)?;

        if whole.is_positive() {
            Ok(ReconciliationOutcome {
                should_route_to_market: true,
                cash_allocated: fractional_value,
                cash_adjustment: Money::ZERO,
                sent_quantity: whole,
                sent_value: whole_value,
                message: format!(
                    "Routed {whole} shares to market, {remainder} covered by cash ({fractional_value})"
                ),
            })
        } else {
            Ok(ReconciliationOutcome {
                should_route_to_market: false,
                cash_allocated: fractional_value,
                cash_adjustment: Money::ZERO,
                sent_quantity: Quantity::ZERO,
                sent_value: Money::ZERO,
                message: format!("Covered by cash ({fractional_value})"),
            })
        }
    }

    /// The reserve pays out what it can, the market sells the rest.
    fn dollar_sell(
        reserve: &mut CashReserve,
        requested: Money,
        price: Money,
    ) -> Result<ReconciliationOutcome, ReconciliationError> {
        let usable = reserve
            .available()
            .max_zero()
            .min(requested)
            .min(reserve.max_per_order());
        let residual = requested - usable;

        if residual.is_positive() {
            reserve.reserve(usable)?;
            Ok(ReconciliationOutcome {
                should_route_to_market: true,
                cash_allocated: usable,
                cash_adjustment: Money::ZERO,
                sent_quantity: Quantity::implied(residual, price),
                sent_value: residual,
                message: format!("Routed {residual} to market, {usable} covered by cash"),
            })
        } else {
            reserve.reserve(requested)?;
            Ok(ReconciliationOutcome {
                should_route_to_market: false,
                cash_allocated: requested,
                cash_adjustment: Money::ZERO,
                sent_quantity: Quantity::ZERO,
                sent_value: Money::ZERO,
                message: format!("Covered by cash ({requested})"),
            })
        }
    }

    /// Small purchases are sold out of the reserve, which is credited on fill.
    fn share_purchase(
        &self,
        quantity: Quantity,
        price: Money,
    ) -> Result<ReconciliationOutcome, ReconciliationError> {
        let value = quantity
            .checked_value(price)
            .ok_or(ReconciliationError::AmountOverflow("share purchase value"))?;

        let outcome = if self.minimum_trade.should_route(quantity, value) {
            ReconciliationOutcome {
                should_route_to_market: true,
                cash_allocated: Money::ZERO,
                cash_adjustment: Money::ZERO,
                sent_quantity: quantity,
                sent_value: value,
                message: format!("Routed {quantity} shares to market"),
            }
        } else {
            ReconciliationOutcome {
                should_route_to_market: false,
                cash_allocated: Money::ZERO,
                cash_adjustment: value,
                sent_quantity: Quantity::ZERO,
                sent_value: Money::ZERO,
                message: format!("Below minimum trade size, filled from reserve ({value})"),
            }
        };
        Ok(outcome)
    }

    /// The purchase is boosted by everything available in the reserve.
    fn dollar_purchase(
        reserve: &mut CashReserve,
        requested: Money,
        price: Money,
    ) -> Result<ReconciliationOutcome, ReconciliationError> {
        let available = reserve.available().max_zero();
        let sent_value = requested
            .checked_add(available)
            .ok_or(ReconciliationError::AmountOverflow("dollar purchase boost"))?;
        reserve.reserve(available)?;

        Ok(ReconciliationOutcome {
            should_route_to_market: true,
            cash_allocated: available,
            cash_adjustment: Money::ZERO,
            sent_quantity: Quantity::implied(sent_value, price),
            sent_value,
            message: format!("Routed {sent_value} to market including {available} from reserve"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cash_reserve::{ReserveKey, ReserveLimits};
    use crate::domain::shared::{AccountId, Symbol};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn reserve(balance: Decimal) -> CashReserve {
        CashReserve::open(
            ReserveKey::new(AccountId::new("ACC-1"), Symbol::new("AAPL")),
            &ReserveLimits {
                initial_balance: Money::new(balance),
                low_balance_threshold: Money::new(dec!(10)),
                max_per_order: Money::new(dec!(1000)),
            },
        )
    }

    fn request(trade_type: TradeType, amount: InstructionAmount, price: Decimal) -> ReconciliationRequest {
        ReconciliationRequest {
            trade_type,
            amount,
            reference_price: Money::new(price),
        }
    }

    fn shares(q: Decimal) -> InstructionAmount {
        InstructionAmount::Shares(Quantity::new(q))
    }

    fn dollars(v: Decimal) -> InstructionAmount {
        InstructionAmount::Dollars(Money::new(v))
    }

    #[test_case(TradeType::ShareSell, shares(dec!(10.25)), dec!(10), dec!(100), true, dec!(2.50), dec!(0), dec!(10), dec!(100) ; "share sell splits fraction from whole shares")]
    #[test_case(TradeType::ShareSell, shares(dec!(7)), dec!(10), dec!(0), true, dec!(0), dec!(0), dec!(7), dec!(70) ; "share sell of whole shares routes everything")]
    #[test_case(TradeType::ShareSell, shares(dec!(0.25)), dec!(10), dec!(100), false, dec!(2.50), dec!(0), dec!(0), dec!(0) ; "share sell of a fraction is covered by cash")]
    #[test_case(TradeType::DollarSell, dollars(dec!(100)), dec!(10), dec!(30), true, dec!(30), dec!(0), dec!(7), dec!(70) ; "dollar sell routes the residual")]
    #[test_case(TradeType::DollarSell, dollars(dec!(20)), dec!(10), dec!(30), false, dec!(20), dec!(0), dec!(0), dec!(0) ; "dollar sell capped by requested value")]
    #[test_case(TradeType::SharePurchase, shares(dec!(0.3)), dec!(100), dec!(100), false, dec!(0), dec!(30), dec!(0), dec!(0) ; "small share purchase is credited")]
    #[test_case(TradeType::SharePurchase, shares(dec!(2)), dec!(100), dec!(100), true, dec!(0), dec!(0), dec!(2), dec!(200) ; "large share purchase is routed")]
    #[test_case(TradeType::DollarPurchase, dollars(dec!(50)), dec!(10), dec!(20), true, dec!(20), dec!(0), dec!(7), dec!(70) ; "dollar purchase is boosted by available cash")]
    #[allow(clippy::too_many_arguments)]
    fn policy_outcomes(
        trade_type: TradeType,
        amount: InstructionAmount,
        price: Decimal,
        balance: Decimal,
        routed: bool,
        allocated: Decimal,
        adjustment: Decimal,
        sent_quantity: Decimal,
        sent_value: Decimal,
    ) {
        let mut reserve = reserve(balance);
        let outcome = ReconciliationEngine::default()
            .reconcile(&mut reserve, &request(trade_type, amount, price))
            .unwrap();

        assert_eq!(outcome.should_route_to_market, routed);
        assert_eq!(outcome.cash_allocated.amount(), allocated);
        assert_eq!(outcome.cash_adjustment.amount(), adjustment);
        assert_eq!(outcome.sent_quantity.amount(), sent_quantity);
        assert_eq!(outcome.sent_value.amount(), sent_value);
        assert_eq!(reserve.pending_reduction().amount(), allocated);
        assert_eq!(reserve.balance().amount(), balance);
    }

    #[test]
    fn share_sell_fails_without_cash_for_fraction() {
        let mut reserve = reserve(dec!(2.00));
        let err = ReconciliationEngine::default()
            .reconcile(&mut reserve, &request(TradeType::ShareSell, shares(dec!(10.25)), dec!(10.00)))
            .unwrap_err();

        assert!(matches!(err, ReconciliationError::InsufficientCash { .. }));
        assert!(reserve.pending_reduction().is_zero());
    }

    #[test]
    fn dollar_sell_respects_per_order_cap() {
        let mut reserve = CashReserve::open(
            ReserveKey::new(AccountId::new("ACC-1"), Symbol::new("AAPL")),
            &ReserveLimits {
                initial_balance: Money::new(dec!(500)),
                low_balance_threshold: Money::new(dec!(10)),
                max_per_order: Money::new(dec!(25)),
            },
        );
        let outcome = ReconciliationEngine::default()
            .reconcile(&mut reserve, &request(TradeType::DollarSell, dollars(dec!(100)), dec!(10)))
            .unwrap();

        assert_eq!(outcome.cash_allocated.amount(), dec!(25));
        assert_eq!(outcome.sent_value.amount(), dec!(75));
    }

    #[test]
    fn dollar_purchase_boost_overflow_reserves_nothing() {
        let mut reserve = reserve(dec!(20));
        let err = ReconciliationEngine::default()
            .reconcile(&mut reserve, &request(TradeType::DollarPurchase, dollars(Decimal::MAX), dec!(10)))
            .unwrap_err();

        assert!(matches!(err, ReconciliationError::AmountOverflow(_)));
        assert!(reserve.pending_reduction().is_zero());
    }

    #[test]
    fn share_purchase_value_overflow_is_refused() {
        let mut reserve = reserve(dec!(20));
        let err = ReconciliationEngine::default()
            .reconcile(&mut reserve, &request(TradeType::SharePurchase, shares(Decimal::MAX), dec!(10)))
            .unwrap_err();
        assert!(matches!(err, ReconciliationError::AmountOverflow(_)));
    }

    #[test]
    fn mismatched_amount_is_refused() {
        let mut reserve = reserve(dec!(20));
        let err = ReconciliationEngine::default()
            .reconcile(&mut reserve, &request(TradeType::DollarPurchase, shares(dec!(5)), dec!(10)))
            .unwrap_err();
        assert!(matches!(err, ReconciliationError::AmountMismatch { .. }));
    }

    #[test]
    fn non_positive_price_is_refused() {
        let mut reserve = reserve(dec!(20));
        let err = ReconciliationEngine::default()
            .reconcile(&mut reserve, &request(TradeType::ShareSell, shares(dec!(5)), dec!(0)))
            .unwrap_err();
        assert!(matches!(err, ReconciliationError::InvalidPrice(_)));
    }
}
