//! Order Repository Traits
//!
//! Persistence abstractions for in-flight and archived orders.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::Order;
use crate::domain::shared::{AccountId, OrderId, RepositoryError};

/// In-flight order registry keyed by client order ID.
///
/// Each call is atomic on its own. Callers serialize the
/// look up, mutate, remove sequence per order ID.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] if the ID is already in flight.
    async fn insert(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Replace an existing order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the order is not in flight.
    async fn update(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Find an order by client order ID.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    async fn find(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Remove an order, returning it if it was present.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    async fn remove(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError>;

    /// All in-flight orders for an account.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    async fn find_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, RepositoryError>;
}

/// Append-only ledger of orders that reached a terminal state.
#[async_trait]
pub trait OrderHistoryRepository: Send + Sync {
    /// Append an archived order.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    async fn append(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Archived orders for an account, oldest first.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    async fn find_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, RepositoryError>;

    /// Number of times an order ID was archived.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    async fn count_for(&self, id: &OrderId) -> Result<usize, RepositoryError>;
}
