//! Order status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status following FIX protocol semantics.
///
/// FIX Protocol Order Status (Tag 39):
/// - `0` = New
/// - `1` = Partially filled
/// - `2` = Filled
/// - `4` = Canceled
/// - `8` = Rejected
/// - `A` = Pending New
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order accepted by the gateway, routing not yet decided or acknowledged.
    PendingNew,
    /// Order acknowledged by the market.
    New,
    /// Order partially filled.
    PartiallyFilled,
    /// Order completely filled (by the market or by the cash reserve).
    Filled,
    /// Order canceled.
    Canceled,
    /// Order rejected before or by the market.
    Rejected,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Canceled | Self::Rejected)
    }

    /// Returns true if the order is working at the market.
    #[must_use]
    pub const fn is_working(&self) -> bool {
        matches!(self, Self::New | Self::PartiallyFilled)
    }

    /// Returns true if the status carries a fill that requires settlement.
    #[must_use]
    pub const fn is_fill(&self) -> bool {
        matches!(self, Self::PartiallyFilled | Self::Filled)
    }

    /// Get the FIX protocol tag 39 value.
    #[must_use]
    pub const fn fix_tag_value(&self) -> char {
        match self {
            Self::New => '0',
            Self::PartiallyFilled => '1',
            Self::Filled => '2',
            Self::Canceled => '4',
            Self::Rejected => '8',
            Self::PendingNew => 'A',
        }
    }

    /// Map an execution report status code to a status.
    ///
    /// Returns `None` for codes the gateway does not recognize.
    #[must_use]
    pub fn from_fix_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::New),
            "1" => Some(Self::PartiallyFilled),
            "2" => Some(Self::Filled),
            "4" => Some(Self::Canceled),
            "8" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PendingNew => write!(f, "PENDING_NEW"),
            Self::New => write!(f, "NEW"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Canceled => write!(f, "CANCELED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}
