//! Order Execution Bounded Context
//!
//! Owns the order lifecycle from instruction acceptance to archive.
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: routing decision, fills and settlement progress
//! - **State Machine**: `PendingNew -> New -> PartiallyFilled -> Filled`, plus
//!   the `Canceled` and `Rejected` exits
//! - **Domain Events**: collected on the aggregate, drained for notification

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{CreateOrderCommand, Execution, Order};
pub use errors::OrderError;
pub use events::OrderEvent;
pub use repository::{OrderHistoryRepository, OrderRepository};
pub use services::OrderStateMachine;
pub use value_objects::{
    ExecutionReport, InstructionAmount, OrderSide, OrderStatus, RoutingDecision, TradeType,
};
