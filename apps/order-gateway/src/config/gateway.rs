//! Gateway, reserve and paper market settings.

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::cash_reserve::ReserveLimits;
use crate::domain::shared::Money;

/// Routing and reference pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Bound on every market call, in milliseconds.
    #[serde(default = "default_routing_timeout_ms")]
    pub routing_timeout_ms: u64,
    /// Price used when the oracle has none.
    #[serde(default = "default_price")]
    pub default_price: Decimal,
    /// End-of-day reference prices by symbol.
    #[serde(default)]
    pub prices: HashMap<String, Decimal>,
}

impl GatewayConfig {
    /// Routing timeout as a `Duration`.
    #[must_use]
    pub const fn routing_timeout(&self) -> Duration {
        Duration::from_millis(self.routing_timeout_ms)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            routing_timeout_ms: default_routing_timeout_ms(),
            default_price: default_price(),
            prices: HashMap::new(),
        }
    }
}

/// Values a reserve starts with the first time an account trades a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservesConfig {
    /// Opening balance.
    #[serde(default = "default_initial_balance")]
    pub initial_balance: Decimal,
    /// Low-balance alert threshold.
    #[serde(default = "default_low_balance_threshold")]
    pub low_balance_threshold: Decimal,
    /// Most cash a single order may draw.
    #[serde(default = "default_max_per_order")]
    pub max_per_order: Decimal,
}

impl ReservesConfig {
    /// Domain limits for new reserves.
    #[must_use]
    pub const fn limits(&self) -> ReserveLimits {
        ReserveLimits {
            initial_balance: Money::new(self.initial_balance),
            low_balance_threshold: Money::new(self.low_balance_threshold),
            max_per_order: Money::new(self.max_per_order),
        }
    }
}

impl Default for ReservesConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
            low_balance_threshold: default_low_balance_threshold(),
            max_per_order: default_max_per_order(),
        }
    }
}

/// Paper market behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Delay before an accepted order fills, in milliseconds.
    #[serde(default = "default_fill_delay_ms")]
    pub fill_delay_ms: u64,
    /// Symbols the venue refuses.
    #[serde(default)]
    pub reject_symbols: Vec<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            fill_delay_ms: default_fill_delay_ms(),
            reject_symbols: Vec::new(),
        }
    }
}

const fn default_routing_timeout_ms() -> u64 {
    5000
}

const fn default_fill_delay_ms() -> u64 {
    50
}

fn default_price() -> Decimal {
    dec!(100.00)
}

fn default_initial_balance() -> Decimal {
    dec!(100.00)
}

fn default_low_balance_threshold() -> Decimal {
    dec!(10.00)
}

fn default_max_per_order() -> Decimal {
    dec!(1000.00)
}
