//! Order execution aggregates.

mod execution;
mod order;

pub use execution::Execution;
pub use order::{CreateOrderCommand, Order};
