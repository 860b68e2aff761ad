//! Money value object for currency amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::domain::shared::DomainError;

/// A monetary amount.
///
/// Represented as a Decimal for precise financial calculations.
/// Always uses 2 decimal places for display (but internal precision is higher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this amount is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Round to 2 decimal places (banker's rounding).
    #[must_use]
    pub fn round(&self) -> Self {
        Self(self.0.round_dp(2))
    }

    /// Clamp negative amounts to zero.
    #[must_use]
    pub fn max_zero(self) -> Self {
        if self.is_negative() { Self::ZERO } else { self }
    }

    /// Sum, or `None` if it overflows.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Validate an amount carried by an instruction.
    ///
    /// # Errors
    ///
    /// Returns error if the amount is zero or negative.
    pub fn validate_for_order(&self) -> Result<(), DomainError> {
        if self.0 <= Decimal::ZERO {
            return Err(DomainError::invalid(
                "amount",
                "Order amount must be positive",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_display_two_places() {
        assert_eq!(format!("{}", Money::new(dec!(150.5))), "$150.50");
    }

    #[test]
    fn money_round_is_bankers() {
        assert_eq!(Money::new(dec!(2.345)).round().amount(), dec!(2.34));
        assert_eq!(Money::new(dec!(2.355)).round().amount(), dec!(2.36));
    }

    #[test]
    fn money_arithmetic_and_assign() {
        let mut m = Money::new(dec!(100));
        m += Money::new(dec!(5));
        m -= Money::new(dec!(20));
        assert_eq!(m.amount(), dec!(85));
        assert_eq!((-m).amount(), dec!(-85));
        assert_eq!((m * dec!(2)).amount(), dec!(170));
    }

    #[test]
    fn money_checked_add() {
        assert_eq!(
            Money::new(dec!(50)).checked_add(Money::new(dec!(20))),
            Some(Money::new(dec!(70)))
        );
        assert!(Money::new(Decimal::MAX).checked_add(Money::new(dec!(1))).is_none());
    }

    #[test]
    fn money_max_zero() {
        assert_eq!(Money::new(dec!(-3)).max_zero(), Money::ZERO);
        assert_eq!(Money::new(dec!(3)).max_zero().amount(), dec!(3));
    }

    #[test]
    fn money_validate_for_order() {
        assert!(Money::new(dec!(10)).validate_for_order().is_ok());
        assert!(Money::ZERO.validate_for_order().is_err());
    }
}
