//! Persistence Adapters
//!
//! In-memory implementations of the repository traits.

pub mod in_memory;
mod in_memory_history;
mod in_memory_reserves;

pub use in_memory::InMemoryOrderRepository;
pub use in_memory_history::InMemoryOrderHistory;
pub use in_memory_reserves::InMemoryReserveRepository;
