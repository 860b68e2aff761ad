//! Observability module for metrics.
//!
//! Logging goes through `tracing` directly; see [`crate::telemetry`] for
//! subscriber setup.

mod metrics;

pub use metrics::{
    record_execution_applied, record_instruction_outcome, record_instruction_received,
    record_instruction_rejection, record_low_balance_alert, record_report_skipped,
    record_routing_failure,
};
