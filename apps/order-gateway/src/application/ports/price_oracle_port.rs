//! Price Oracle Port (Driven Port)
//!
//! End-of-day reference prices per instrument.

use async_trait::async_trait;

use crate::domain::shared::{Money, Symbol};

/// Price oracle error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PriceOracleError {
    /// Oracle could not be reached.
    #[error("Price oracle unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for reference prices.
#[async_trait]
pub trait PriceOraclePort: Send + Sync {
    /// Reference price for a symbol, `None` when the oracle has none.
    async fn reference_price(&self, symbol: &Symbol) -> Result<Option<Money>, PriceOracleError>;
}
