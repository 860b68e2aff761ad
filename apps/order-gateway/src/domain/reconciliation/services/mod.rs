//! Reconciliation domain services.

mod reconciliation_engine;
mod settlement_policy;

pub use reconciliation_engine::ReconciliationEngine;
pub use settlement_policy::{SettlementDelta, SettlementPolicy};
