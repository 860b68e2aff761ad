//! Domain Layer
//!
//! Pure business logic with no infrastructure dependencies.
//!
//! # Bounded Contexts
//!
//! - `order_execution`: order lifecycle, state machine and execution reports
//! - `cash_reserve`: per account, per instrument cash pools
//! - `reconciliation`: market/reserve split and fill settlement
//! - `shared`: value objects used across contexts

pub mod cash_reserve;
pub mod order_execution;
pub mod reconciliation;
pub mod shared;
