//! UTC timestamps for orders, fills and reserve updates.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp, millisecond precision on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> Timestamp {
        serde_json::from_str(&format!("\"{rfc3339}\"")).unwrap()
    }

    #[test]
    fn orders_chronologically() {
        assert!(at("2026-03-02T14:30:00Z") < at("2026-03-02T21:00:00Z"));
    }

    #[test]
    fn displays_millis_in_utc() {
        assert_eq!(at("2026-03-02T09:30:00.25-05:00").to_string(), "2026-03-02T14:30:00.250Z");
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
    }
}
