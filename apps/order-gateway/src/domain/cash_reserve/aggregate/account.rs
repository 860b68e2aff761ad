//! Account aggregate: the reserves an account holds, keyed by instrument.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::CashReserve;
use crate::domain::shared::{AccountId, Money, Symbol, Timestamp};

/// An account and its per-instrument cash reserves.
///
/// Reserves are added the first time the account trades an instrument and
/// are never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    reserves: BTreeMap<Symbol, CashReserve>,
    opened_at: Timestamp,
}

impl Account {
    /// Create an account with no reserves.
    #[must_use]
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            reserves: BTreeMap::new(),
            opened_at: Timestamp::now(),
        }
    }

    /// Account ID.
    #[must_use]
    pub const fn id(&self) -> &AccountId {
        &self.id
    }

    /// When the account first traded.
    #[must_use]
    pub const fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    /// Reserve for an instrument.
    #[must_use]
    pub fn reserve(&self, symbol: &Symbol) -> Option<&CashReserve> {
        self.reserves.get(symbol)
    }

    /// All reserves, ordered by symbol.
    pub fn reserves(&self) -> impl Iterator<Item = &CashReserve> {
        self.reserves.values()
    }

    /// Insert or replace the reserve for its instrument.
    pub fn upsert(&mut self, reserve: CashReserve) {
        self.reserves.insert(reserve.key().symbol.clone(), reserve);
    }

    /// Sum of balances across reserves.
    #[must_use]
    pub fn total_balance(&self) -> Money {
        self.reserves
            .values()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.balance().amount()))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cash_reserve::aggregate::{ReserveKey, ReserveLimits};
    use rust_decimal_macros::dec;

    #[test]
    fn upsert_replaces_by_symbol() {
        let limits = ReserveLimits {
            initial_balance: Money::new(dec!(100)),
            low_balance_threshold: Money::new(dec!(10)),
            max_per_order: Money::new(dec!(1000)),
        };
        let mut account = Account::new(AccountId::new("ACC-1"));
        let key = ReserveKey::new(AccountId::new("ACC-1"), Symbol::new("AAPL"));
        let mut reserve = CashReserve::open(key.clone(), &limits);
        account.upsert(reserve.clone());
        account.upsert(CashReserve::open(
            ReserveKey::new(AccountId::new("ACC-1"), Symbol::new("MSFT")),
            &limits,
        ));

        reserve.adjust(Money::new(dec!(-40))).unwrap();
        account.upsert(reserve);

        assert_eq!(account.reserves().count(), 2);
        assert_eq!(
            account.reserve(&key.symbol).unwrap().balance().amount(),
            dec!(60)
        );
        assert_eq!(account.total_balance().amount(), dec!(160));
    }
}
