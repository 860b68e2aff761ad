//! Static end-of-day price table.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::application::ports::{PriceOracleError, PriceOraclePort};
use crate::domain::shared::{Money, Symbol};

/// Reference prices seeded from configuration.
///
/// Prices can be replaced at runtime, e.g. after an end-of-day load.
#[derive(Debug, Default)]
pub struct StaticPriceOracle {
    prices: DashMap<Symbol, Money>,
}

impl StaticPriceOracle {
    /// Create an empty oracle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an oracle from a symbol to price table.
    #[must_use]
    pub fn from_prices(prices: &HashMap<String, Decimal>) -> Self {
        let oracle = Self::new();
        for (symbol, price) in prices {
            oracle.set_price(symbol, *price);
        }
        oracle
    }

    /// Set the price for a symbol.
    pub fn set_price(&self, symbol: &str, price: Decimal) {
        self.prices.insert(Symbol::new(symbol), Money::new(price));
    }

    /// Number of priced symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no symbol is priced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
impl PriceOraclePort for StaticPriceOracle {
    async fn reference_price(&self, symbol: &Symbol) -> Result<Option<Money>, PriceOracleError> {
        Ok(self.prices.get(symbol).map(|p| *p.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn seeded_prices_are_normalized() {
        let mut table = HashMap::new();
        table.insert("aapl".to_string(), dec!(187.25));
        let oracle = StaticPriceOracle::from_prices(&table);

        let price = oracle.reference_price(&Symbol::new("AAPL")).await.unwrap();
        assert_eq!(price, Some(Money::new(dec!(187.25))));
        assert_eq!(oracle.len(), 1);
    }

    #[tokio::test]
    async fn missing_symbol_is_none() {
        let oracle = StaticPriceOracle::new();
        assert!(oracle.is_empty());
        let price = oracle.reference_price(&Symbol::new("MSFT")).await.unwrap();
        assert!(price.is_none());
    }

    #[tokio::test]
    async fn set_price_overwrites() {
        let oracle = StaticPriceOracle::new();
        oracle.set_price("AAPL", dec!(10));
        oracle.set_price("AAPL", dec!(11));
        let price = oracle.reference_price(&Symbol::new("AAPL")).await.unwrap();
        assert_eq!(price, Some(Money::new(dec!(11))));
    }
}
