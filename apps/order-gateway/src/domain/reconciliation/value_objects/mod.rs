//! Reconciliation value objects.

mod minimum_trade_policy;
mod outcome;
mod request;

pub use minimum_trade_policy::MinimumTradePolicy;
pub use outcome::ReconciliationOutcome;
pub use request::ReconciliationRequest;
