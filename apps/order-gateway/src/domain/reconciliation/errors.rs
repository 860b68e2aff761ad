//! Reconciliation errors.

use thiserror::Error;

use crate::domain::cash_reserve::ReserveError;
use crate::domain::order_execution::TradeType;
use crate::domain::shared::Money;

/// Reasons the engine declines an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    /// The reserve cannot cover the cash portion of the instruction.
    #[error("Insufficient cash: need {required}, available {available}")]
    InsufficientCash {
        /// Cash the policy needed.
        required: Money,
        /// Cash available in the reserve.
        available: Money,
    },

    /// Amount basis does not match the trade type.
    #[error("Trade type {trade_type} cannot carry this amount")]
    AmountMismatch {
        /// Trade type.
        trade_type: TradeType,
    },

    /// A computed amount does not fit the decimal range.
    #[error("Amount exceeds the supported range: {0}")]
    AmountOverflow(&'static str),

    /// Reference price is zero or negative.
    #[error("Reference price must be positive, got {0}")]
    InvalidPrice(Money),

    /// Reserve mutation failed.
    #[error(transparent)]
    Reserve(#[from] ReserveError),
}
