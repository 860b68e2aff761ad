//! Reconciliation Bounded Context
//!
//! Decides how much of an instruction is routed to the market and how much
//! the cash reserve covers, and what each fill owes the reserve.

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::ReconciliationError;
pub use services::{ReconciliationEngine, SettlementDelta, SettlementPolicy};
pub use value_objects::{MinimumTradePolicy, ReconciliationOutcome, ReconciliationRequest};
