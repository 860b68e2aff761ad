//! Trade types and the amount an instruction carries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{Money, Quantity};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy.
    Buy,
    /// Sell.
    Sell,
}

impl OrderSide {
    /// FIX tag 54 value.
    #[must_use]
    pub const fn fix_tag_value(&self) -> char {
        match self {
            Self::Buy => '1',
            Self::Sell => '2',
        }
    }

    /// Parse a FIX tag 54 value.
    #[must_use]
    pub fn from_fix_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Buy),
            "2" => Some(Self::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// What an instruction asks for: a share quantity or a monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "basis", content = "amount", rename_all = "snake_case")]
pub enum InstructionAmount {
    /// Number of shares.
    Shares(Quantity),
    /// Cash value.
    Dollars(Money),
}

/// The four reconciliation policies.
///
/// Closed on purpose: each variant has its own reconciliation and
/// settlement rule, so a new variant must be handled everywhere it is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    /// Sell a number of shares.
    ShareSell,
    /// Sell a cash value worth of shares.
    DollarSell,
    /// Buy a number of shares.
    SharePurchase,
    /// Buy a cash value worth of shares.
    DollarPurchase,
}

impl TradeType {
    /// Derive the trade type from side and instruction amount.
    #[must_use]
    pub const fn from_parts(side: OrderSide, amount: &InstructionAmount) -> Self {
        match (side, amount) {
            (OrderSide::Sell, InstructionAmount::Shares(_)) => Self::ShareSell,
            (OrderSide::Sell, InstructionAmount::Dollars(_)) => Self::DollarSell,
            (OrderSide::Buy, InstructionAmount::Shares(_)) => Self::SharePurchase,
            (OrderSide::Buy, InstructionAmount::Dollars(_)) => Self::DollarPurchase,
        }
    }

    /// Side sent to the market.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        match self {
            Self::ShareSell | Self::DollarSell => OrderSide::Sell,
            Self::SharePurchase | Self::DollarPurchase => OrderSide::Buy,
        }
    }

    /// Returns true if the instruction is denominated in cash.
    #[must_use]
    pub const fn is_dollar_based(&self) -> bool {
        matches!(self, Self::DollarSell | Self::DollarPurchase)
    }

    /// Stable label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ShareSell => "share_sell",
            Self::DollarSell => "dollar_sell",
            Self::SharePurchase => "share_purchase",
            Self::DollarPurchase => "dollar_purchase",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
