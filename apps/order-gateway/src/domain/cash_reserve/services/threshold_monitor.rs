//! Low-balance threshold monitor.

use crate::domain::shared::Money;

/// Outcome of a threshold check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdCheck {
    /// Balance crossed to or below the threshold with no alert outstanding.
    Crossed,
    /// Balance rose above the threshold while an alert was outstanding.
    Recovered,
    /// Nothing to report.
    Unchanged,
}

/// Decides when a reserve raises or clears its low-balance alert.
///
/// One alert per continuous interval at or below the threshold.
pub struct ThresholdMonitor;

impl ThresholdMonitor {
    /// Compare a balance against its threshold.
    #[must_use]
    pub fn check(balance: Money, threshold: Money, alert_sent: bool) -> ThresholdCheck {
        match (balance <= threshold, alert_sent) {
            (true, false) => ThresholdCheck::Crossed,
            (false, true) => ThresholdCheck::Recovered,
            _ => ThresholdCheck::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case(dec!(10), false, ThresholdCheck::Crossed ; "at threshold")]
    #[test_case(dec!(3), false, ThresholdCheck::Crossed ; "below threshold")]
    #[test_case(dec!(3), true, ThresholdCheck::Unchanged ; "still below after alert")]
    #[test_case(dec!(11), true, ThresholdCheck::Recovered ; "recovered")]
    #[test_case(dec!(11), false, ThresholdCheck::Unchanged ; "healthy")]
    fn threshold_checks(balance: rust_decimal::Decimal, alert_sent: bool, expected: ThresholdCheck) {
        assert_eq!(
            ThresholdMonitor::check(Money::new(balance), Money::new(dec!(10)), alert_sent),
            expected
        );
    }
}
