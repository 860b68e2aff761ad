//! Reference price lookup with a configured fallback.

use std::sync::Arc;

use crate::application::ports::PriceOraclePort;
use crate::domain::shared::{Money, Symbol};

/// Resolves the reference price for an instrument.
///
/// Falls back to the default price when the oracle has no price or fails.
pub struct ReferencePriceService<P: PriceOraclePort> {
    oracle: Arc<P>,
    default_price: Money,
}

impl<P: PriceOraclePort> ReferencePriceService<P> {
    /// Create a new service.
    pub const fn new(oracle: Arc<P>, default_price: Money) -> Self {
        Self {
            oracle,
            default_price,
        }
    }

    /// Price used when the oracle has none.
    #[must_use]
    pub const fn default_price(&self) -> Money {
        self.default_price
    }

    /// Reference price for `symbol`.
    pub async fn price_for(&self, symbol: &Symbol) -> Money {
        match self.oracle.reference_price(symbol).await {
            Ok(Some(price)) if price.is_positive() => price,
            Ok(Some(price)) => {
                tracing::warn!(
                    symbol = %symbol,
                    price = %price,
                    "Oracle returned non-positive price, using default"
                );
                self.default_price
            }
            Ok(None) => {
                tracing::debug!(symbol = %symbol, default = %self.default_price, "No reference price, using default");
                self.default_price
            }
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Price oracle failed, using default");
                self.default_price
            }
        }
    }
}
