//! Metrics for the order gateway.
//!
//! Counters and histograms are recorded through the `metrics` facade. The
//! library installs no recorder; the host process chooses one.

use metrics::{counter, histogram};

// ============================================================================
// Instruction Metrics
// ============================================================================

/// Record an instruction received from upstream.
///
/// # Arguments
///
/// * `trade_type` - Trade type label (e.g., `"share_sell"`), or `"invalid"`
pub fn record_instruction_received(trade_type: &str) {
    counter!(
        "gateway_instructions_received_total",
        "trade_type" => trade_type.to_string()
    )
    .increment(1);
}

/// Record the outcome of an instruction.
///
/// # Arguments
///
/// * `trade_type` - Trade type label
/// * `outcome` - `"routed"`, `"cash_covered"` or `"rejected"`
/// * `latency_seconds` - Time from receipt to response in seconds
pub fn record_instruction_outcome(trade_type: &str, outcome: &str, latency_seconds: f64) {
    counter!(
        "gateway_instructions_total",
        "trade_type" => trade_type.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(
        "gateway_instruction_latency_seconds",
        "trade_type" => trade_type.to_string()
    )
    .record(latency_seconds);
}

/// Record an instruction rejection.
///
/// # Arguments
///
/// * `code` - Error code reason (e.g., `"INSUFFICIENT_CASH"`)
pub fn record_instruction_rejection(code: &str) {
    counter!(
        "gateway_instruction_rejections_total",
        "code" => code.to_string()
    )
    .increment(1);
}

// ============================================================================
// Market Routing Metrics
// ============================================================================

/// Record a market routing failure.
///
/// # Arguments
///
/// * `operation` - `"submit"` or `"cancel"`
/// * `reason` - `"rejected"`, `"unavailable"`, `"timeout"` or `"not_found"`
pub fn record_routing_failure(operation: &str, reason: &str) {
    counter!(
        "gateway_routing_failures_total",
        "operation" => operation.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}

// ============================================================================
// Execution Metrics
// ============================================================================

/// Record an execution report applied to an order.
///
/// # Arguments
///
/// * `status` - Order status after the report
pub fn record_execution_applied(status: &str) {
    counter!(
        "gateway_executions_applied_total",
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record an execution report that was not applied.
///
/// # Arguments
///
/// * `reason` - `"unknown_order"`, `"unknown_status"`, `"duplicate"`, `"terminal"`,
///   `"invalid_report"` or `"invalid_transition"`
pub fn record_report_skipped(reason: &str) {
    counter!(
        "gateway_reports_skipped_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

// ============================================================================
// Reserve Metrics
// ============================================================================

/// Record a low-balance alert.
pub fn record_low_balance_alert(symbol: &str) {
    counter!(
        "gateway_low_balance_alerts_total",
        "symbol" => symbol.to_string()
    )
    .increment(1);
}
