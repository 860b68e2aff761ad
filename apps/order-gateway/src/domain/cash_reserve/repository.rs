//! Reserve Repository Trait

use async_trait::async_trait;

use super::aggregate::{Account, CashReserve, ReserveKey};
use crate::domain::shared::{AccountId, RepositoryError};

/// Store of accounts and their reserves.
///
/// `save` is atomic per reserve. Callers serialize load, mutate, save
/// per [`ReserveKey`].
#[async_trait]
pub trait ReserveRepository: Send + Sync {
    /// Find a reserve.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    async fn find(&self, key: &ReserveKey) -> Result<Option<CashReserve>, RepositoryError>;

    /// Insert or replace a reserve, creating its account on first use.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    async fn save(&self, reserve: &CashReserve) -> Result<(), RepositoryError>;

    /// Find an account with all its reserves.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    async fn find_account(&self, account_id: &AccountId) -> Result<Option<Account>, RepositoryError>;
}
