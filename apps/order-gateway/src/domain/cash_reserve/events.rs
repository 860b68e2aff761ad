//! Domain events for cash reserves.

use serde::{Deserialize, Serialize};

use super::aggregate::ReserveKey;
use crate::domain::shared::{Money, Timestamp};

/// Events raised by reserve mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReserveEvent {
    /// Balance fell to or below the threshold.
    LowBalance(LowBalanceAlert),
    /// Balance rose back above the threshold.
    BalanceRecovered(BalanceRecovered),
}

impl ReserveEvent {
    /// Reserve the event belongs to.
    #[must_use]
    pub const fn key(&self) -> &ReserveKey {
        match self {
            Self::LowBalance(e) => &e.key,
            Self::BalanceRecovered(e) => &e.key,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::LowBalance(_) => "RESERVE_LOW_BALANCE",
            Self::BalanceRecovered(_) => "RESERVE_BALANCE_RECOVERED",
        }
    }
}

/// Event: low balance alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowBalanceAlert {
    /// Reserve key.
    pub key: ReserveKey,
    /// Balance after the mutation.
    pub balance: Money,
    /// Configured threshold.
    pub threshold: Money,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: balance back above threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecovered {
    /// Reserve key.
    pub key: ReserveKey,
    /// Balance after the mutation.
    pub balance: Money,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}
