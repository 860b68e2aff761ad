//! Cash reserve errors.

use thiserror::Error;

use crate::domain::shared::Money;

/// Errors raised by reserve mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReserveError {
    /// Not enough available cash for a reservation.
    #[error("Insufficient cash in reserve {key}: requested {requested}, available {available}")]
    InsufficientCash {
        /// Reserve key.
        key: String,
        /// Amount asked for.
        requested: Money,
        /// Amount available.
        available: Money,
    },

    /// Negative amount passed to a mutation.
    #[error("Invalid reserve amount for {operation}: {amount}")]
    InvalidAmount {
        /// Mutation name.
        operation: &'static str,
        /// Offending amount.
        amount: Money,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn insufficient_cash_display() {
        let err = ReserveError::InsufficientCash {
            key: "ACC-1:AAPL".to_string(),
            requested: Money::new(dec!(2.5)),
            available: Money::new(dec!(1)),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient cash in reserve ACC-1:AAPL: requested $2.50, available $1.00"
        );
    }
}
