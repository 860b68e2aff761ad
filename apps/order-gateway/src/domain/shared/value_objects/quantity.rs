//! Quantity value object for share quantities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use crate::domain::shared::{DomainError, Money};

/// Decimal places kept when a quantity is implied from a cash value.
const IMPLIED_DP: u32 = 6;

/// A share quantity.
///
/// Represented as a Decimal because instructions may ask for fractional shares;
/// only whole shares are ever routed to the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a new Quantity from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Zero quantity.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this quantity is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this quantity is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Whole-share part (truncated toward zero).
    #[must_use]
    pub fn whole(&self) -> Self {
        Self(self.0.trunc())
    }

    /// Fractional remainder after removing whole shares.
    #[must_use]
    pub fn fraction(&self) -> Self {
        Self(self.0 - self.0.trunc())
    }

    /// Shares a cash value buys at a price, kept to 6 decimal places.
    ///
    /// Returns zero when the price is zero.
    #[must_use]
    pub fn implied(value: Money, price: Money) -> Self {
        value
            .amount()
            .checked_div(price.amount())
            .map_or(Self::ZERO, |q| Self(q.round_dp(IMPLIED_DP)))
    }

    /// Notional value at a price, or `None` if it overflows.
    #[must_use]
    pub fn checked_value(&self, price: Money) -> Option<Money> {
        self.0.checked_mul(price.amount()).map(Money::new)
    }

    /// Validate quantity for order submission.
    ///
    /// # Errors
    ///
    /// Returns error if quantity is zero or negative.
    pub fn validate_for_order(&self) -> Result<(), DomainError> {
        if self.0 <= Decimal::ZERO {
            return Err(DomainError::invalid(
                "quantity",
                "Order quantity must be positive",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<Decimal> for Quantity {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}
