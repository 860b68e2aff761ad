//! Cash Reserve Aggregate
//!
//! Per (account, instrument) cash pool. The reservation math is the unit of
//! consistency: callers hold the reserve's lock from load to save.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::cash_reserve::errors::ReserveError;
use crate::domain::cash_reserve::events::{BalanceRecovered, LowBalanceAlert, ReserveEvent};
use crate::domain::cash_reserve::services::{ThresholdCheck, ThresholdMonitor};
use crate::domain::shared::{AccountId, Money, Symbol, Timestamp};

/// Identifies a reserve: one per account per instrument.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReserveKey {
    /// Account.
    pub account_id: AccountId,
    /// Instrument.
    pub symbol: Symbol,
}

impl ReserveKey {
    /// Create a new key.
    #[must_use]
    pub const fn new(account_id: AccountId, symbol: Symbol) -> Self {
        Self { account_id, symbol }
    }
}

impl fmt::Display for ReserveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.account_id, self.symbol)
    }
}

/// Values a reserve starts with when an account first trades an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveLimits {
    /// Opening balance.
    pub initial_balance: Money,
    /// Balance at or below which a low-balance alert fires.
    pub low_balance_threshold: Money,
    /// Most cash a single order may draw.
    pub max_per_order: Money,
}

/// Cash Reserve Aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashReserve {
    key: ReserveKey,
    balance: Money,
    starting_balance: Money,
    pending_reduction: Money,
    low_balance_threshold: Money,
    max_per_order: Money,
    alert_sent: bool,
    updated_at: Timestamp,
    #[serde(skip)]
    events: Vec<ReserveEvent>,
}

impl CashReserve {
    /// Open a reserve with the configured starting values.
    ///
    /// A reserve that opens at or below its threshold raises the alert
    /// immediately.
    #[must_use]
    pub fn open(key: ReserveKey, limits: &ReserveLimits) -> Self {
        let mut reserve = Self {
            key,
            balance: limits.initial_balance,
            starting_balance: limits.initial_balance,
            pending_reduction: Money::ZERO,
            low_balance_threshold: limits.low_balance_threshold,
            max_per_order: limits.max_per_order,
            alert_sent: false,
            updated_at: Timestamp::now(),
            events: Vec::new(),
        };
        reserve.after_mutation();
        reserve
    }

    /// Get the reserve key.
    #[must_use]
    pub const fn key(&self) -> &ReserveKey {
        &self.key
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> Money {
        self.balance
    }

    /// Balance the reserve opened with.
    #[must_use]
    pub const fn starting_balance(&self) -> Money {
        self.starting_balance
    }

    /// Cash committed to in-flight orders.
    #[must_use]
    pub const fn pending_reduction(&self) -> Money {
        self.pending_reduction
    }

    /// `balance - pending_reduction`.
    #[must_use]
    pub fn available(&self) -> Money {
        self.balance - self.pending_reduction
    }

    /// Low-balance threshold.
    #[must_use]
    pub const fn low_balance_threshold(&self) -> Money {
        self.low_balance_threshold
    }

    /// Per-order cap.
    #[must_use]
    pub const fn max_per_order(&self) -> Money {
        self.max_per_order
    }

    /// Whether a low-balance alert is outstanding.
    #[must_use]
    pub const fn alert_sent(&self) -> bool {
        self.alert_sent
    }

    /// Last mutation time.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Earmark cash for an in-flight order.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError::InsufficientCash`] if `amount` exceeds
    /// available cash; the reserve is unchanged.
    pub fn reserve(&mut self, amount: Money) -> Result<(), ReserveError> {
        ensure_non_negative("reserve", amount)?;
        if amount > self.available() {
            return Err(ReserveError::InsufficientCash {
                key: self.key.to_string(),
                requested: amount,
                available: self.available(),
            });
        }
        self.pending_reduction += amount;
        self.after_mutation();
        Ok(())
    }

    /// Return earmarked cash without spending it.
    ///
    /// Releases at most the current pending reduction and returns the
    /// amount actually released.
    pub fn release(&mut self, amount: Money) -> Money {
        let released = amount.max_zero().min(self.pending_reduction);
        self.pending_reduction -= released;
        self.after_mutation();
        released
    }

    /// Credit (positive) or debit (negative) the balance.
    ///
    /// # Errors
    ///
    /// Returns error if the new balance overflows; the reserve is unchanged.
    pub fn adjust(&mut self, amount: Money) -> Result<(), ReserveError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(ReserveError::InvalidAmount {
                operation: "adjust",
                amount,
            })?;
        self.after_mutation();
        Ok(())
    }

    /// Drain all pending domain events.
    pub fn drain_events(&mut self) -> Vec<ReserveEvent> {
        std::mem::take(&mut self.events)
    }

    fn after_mutation(&mut self) {
        let now = Timestamp::now();
        self.updated_at = now;
        match ThresholdMonitor::check(self.balance, self.low_balance_threshold, self.alert_sent) {
            ThresholdCheck::Crossed => {
                self.alert_sent = true;
                self.events.push(ReserveEvent::LowBalance(LowBalanceAlert {
                    key: self.key.clone(),
                    balance: self.balance,
                    threshold: self.low_balance_threshold,
                    occurred_at: now,
                }));
            }
            ThresholdCheck::Recovered => {
                self.alert_sent = false;
                self.events
                    .push(ReserveEvent::BalanceRecovered(BalanceRecovered {
                        key: self.key.clone(),
                        balance: self.balance,
                        occurred_at: now,
                    }));
            }
            ThresholdCheck::Unchanged => {}
        }
    }
}

fn ensure_non_negative(operation: &'static str, amount: Money) -> Result<(), ReserveError> {
    if amount.is_negative() {
        return Err(ReserveError::InvalidAmount { operation, amount });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn limits(balance: Decimal) -> ReserveLimits {
        ReserveLimits {
            initial_balance: Money::new(balance),
            low_balance_threshold: Money::new(dec!(10)),
            max_per_order: Money::new(dec!(1000)),
        }
    }

    fn reserve_with(balance: Decimal) -> CashReserve {
        let key = ReserveKey::new(AccountId::new("ACC-1"), Symbol::new("AAPL"));
        let mut reserve = CashReserve::open(key, &limits(balance));
        reserve.drain_events();
        reserve
    }

    #[test]
    fn reserve_reduces_available_only() {
        let mut reserve = reserve_with(dec!(100));
        reserve.reserve(Money::new(dec!(30))).unwrap();
        assert_eq!(reserve.balance().amount(), dec!(100));
        assert_eq!(reserve.available().amount(), dec!(70));
    }

    #[test]
    fn reserve_refuses_more_than_available() {
        let mut reserve = reserve_with(dec!(2));
        let err = reserve.reserve(Money::new(dec!(2.50))).unwrap_err();
        assert!(matches!(err, ReserveError::InsufficientCash { .. }));
        assert!(reserve.pending_reduction().is_zero());
    }

    #[test]
    fn release_leaves_balance_untouched() {
        let mut reserve = reserve_with(dec!(100));
        reserve.reserve(Money::new(dec!(20))).unwrap();
        reserve.release(Money::new(dec!(20)));
        assert_eq!(reserve.balance().amount(), dec!(100));
        assert_eq!(reserve.available().amount(), dec!(100));
    }

    #[test]
    fn release_is_capped_at_pending() {
        let mut reserve = reserve_with(dec!(100));
        reserve.reserve(Money::new(dec!(5))).unwrap();
        assert_eq!(reserve.release(Money::new(dec!(8))).amount(), dec!(5));
        assert!(reserve.pending_reduction().is_zero());
    }

    #[test]
    fn overflowing_adjustment_leaves_balance() {
        let mut reserve = reserve_with(dec!(100));
        reserve.adjust(Money::new(Decimal::MAX)).unwrap_err();
        assert_eq!(reserve.balance().amount(), dec!(100));
    }

    #[test]
    fn low_balance_alert_fires_once_per_crossing() {
        let mut reserve = reserve_with(dec!(15));
        reserve.adjust(Money::new(dec!(-6))).unwrap();
        reserve.adjust(Money::new(dec!(-1))).unwrap();
        let events = reserve.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ReserveEvent::LowBalance(_)));
        assert!(reserve.alert_sent());

        reserve.adjust(Money::new(dec!(5))).unwrap();
        assert!(!reserve.alert_sent());
        reserve.adjust(Money::new(dec!(-5))).unwrap();
        let events = reserve.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], ReserveEvent::LowBalance(_)));
    }

    #[test]
    fn reserve_opening_below_threshold_alerts() {
        let key = ReserveKey::new(AccountId::new("ACC-1"), Symbol::new("AAPL"));
        let mut reserve = CashReserve::open(key, &limits(dec!(5)));
        assert!(reserve.alert_sent());
        assert_eq!(reserve.drain_events().len(), 1);
    }

    #[test]
    fn key_display() {
        let key = ReserveKey::new(AccountId::new("ACC-1"), Symbol::new("msft"));
        assert_eq!(key.to_string(), "ACC-1:MSFT");
    }

    proptest! {
        #[test]
        fn available_never_negative_after_reservation(
            balance in 0i64..100_000,
            requests in proptest::collection::vec(0i64..50_000, 1..20),
        ) {
            let mut reserve = reserve_with(Decimal::new(balance, 2));
            for cents in requests {
                let _ = reserve.reserve(Money::new(Decimal::new(cents, 2)));
                prop_assert!(!reserve.available().is_negative());
            }
        }
    }
}
