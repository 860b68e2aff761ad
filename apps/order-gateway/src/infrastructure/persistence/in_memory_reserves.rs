//! In-memory account and reserve store.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::cash_reserve::{Account, CashReserve, ReserveKey, ReserveRepository};
use crate::domain::shared::{AccountId, RepositoryError};

/// Accounts keyed by ID, each owning its reserves.
#[derive(Debug, Default)]
pub struct InMemoryReserveRepository {
    accounts: DashMap<AccountId, Account>,
}

impl InMemoryReserveRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

#[async_trait]
impl ReserveRepository for InMemoryReserveRepository {
    async fn find(&self, key: &ReserveKey) -> Result<Option<CashReserve>, RepositoryError> {
        Ok(self
            .accounts
            .get(&key.account_id)
            .and_then(|account| account.reserve(&key.symbol).cloned()))
    }

    async fn save(&self, reserve: &CashReserve) -> Result<(), RepositoryError> {
        let account_id = reserve.key().account_id.clone();
        self.accounts
            .entry(account_id.clone())
            .or_insert_with(|| Account::new(account_id))
            .upsert(reserve.clone());
        Ok(())
    }

    async fn find_account(&self, account_id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(self.accounts.get(account_id).map(|a| a.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cash_reserve::ReserveLimits;
    use crate::domain::shared::{Money, Symbol};
    use rust_decimal_macros::dec;

    fn limits() -> ReserveLimits {
        ReserveLimits {
            initial_balance: Money::new(dec!(100)),
            low_balance_threshold: Money::new(dec!(10)),
            max_per_order: Money::new(dec!(1000)),
        }
    }

    #[tokio::test]
    async fn save_creates_account_on_first_use() {
        let repo = InMemoryReserveRepository::new();
        let key = ReserveKey::new(AccountId::new("ACC-1"), Symbol::new("AAPL"));
        assert!(repo.find(&key).await.unwrap().is_none());

        repo.save(&CashReserve::open(key.clone(), &limits()))
            .await
            .unwrap();

        let found = repo.find(&key).await.unwrap().unwrap();
        assert_eq!(found.balance().amount(), dec!(100));
        assert_eq!(repo.account_count(), 1);
    }

    #[tokio::test]
    async fn reserves_are_independent_per_symbol() {
        let repo = InMemoryReserveRepository::new();
        let account = AccountId::new("ACC-1");
        let aapl = ReserveKey::new(account.clone(), Symbol::new("AAPL"));
        let msft = ReserveKey::new(account.clone(), Symbol::new("MSFT"));

        let mut reserve = CashReserve::open(aapl.clone(), &limits());
        reserve.reserve(Money::new(dec!(40))).unwrap();
        repo.save(&reserve).await.unwrap();
        repo.save(&CashReserve::open(msft.clone(), &limits()))
            .await
            .unwrap();

        let snapshot = repo.find_account(&account).await.unwrap().unwrap();
        assert_eq!(snapshot.reserves().count(), 2);
        assert_eq!(
            repo.find(&aapl).await.unwrap().unwrap().available().amount(),
            dec!(60)
        );
        assert_eq!(
            repo.find(&msft).await.unwrap().unwrap().available().amount(),
            dec!(100)
        );
    }
}
