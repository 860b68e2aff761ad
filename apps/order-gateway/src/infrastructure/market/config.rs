//! Paper market configuration.

use std::collections::HashSet;
use std::time::Duration;

use crate::domain::shared::Symbol;

/// Behaviour of the paper venue.
#[derive(Debug, Clone, Default)]
pub struct PaperMarketConfig {
    /// Delay between acknowledgement and fill.
    pub fill_delay: Duration,
    /// Symbols the venue refuses.
    pub reject_symbols: HashSet<Symbol>,
}

impl PaperMarketConfig {
    /// Create a config with a fill delay.
    #[must_use]
    pub fn with_fill_delay(fill_delay: Duration) -> Self {
        Self {
            fill_delay,
            ..Default::default()
        }
    }

    /// Refuse orders for `symbol`.
    #[must_use]
    pub fn rejecting(mut self, symbol: &str) -> Self {
        self.reject_symbols.insert(Symbol::new(symbol));
        self
    }
}
