//! Apply Execution Report Use Case

use std::sync::Arc;

use crate::application::dto::ReportDisposition;
use crate::application::ports::NotificationPort;
use crate::application::services::{OrderLifecycleManager, SettlementService};
use crate::domain::cash_reserve::ReserveRepository;
use crate::domain::order_execution::{
    ExecutionReport, OrderError, OrderHistoryRepository, OrderRepository, OrderStatus,
};
use crate::observability;

/// Use case for absorbing market execution reports.
pub struct ApplyExecutionReportUseCase<O, H, R, N>
where
    O: OrderRepository,
    H: OrderHistoryRepository,
    R: ReserveRepository,
    N: NotificationPort,
{
    lifecycle: Arc<OrderLifecycleManager<O, H, N>>,
    settlement: Arc<SettlementService<R, N>>,
}

impl<O, H, R, N> ApplyExecutionReportUseCase<O, H, R, N>
where
    O: OrderRepository,
    H: OrderHistoryRepository,
    R: ReserveRepository,
    N: NotificationPort,
{
    /// Create a new `ApplyExecutionReportUseCase`.
    pub const fn new(
        lifecycle: Arc<OrderLifecycleManager<O, H, N>>,
        settlement: Arc<SettlementService<R, N>>,
    ) -> Self {
        Self {
            lifecycle,
            settlement,
        }
    }

    /// Execute the use case.
    ///
    /// Reports for orders not in flight are logged and discarded.
    pub async fn execute(&self, report: ExecutionReport) -> ReportDisposition {
        let id = report.client_order_id.clone();
        let _guard = self.lifecycle.lock(&id).await;

        let mut order = match self.lifecycle.find(&id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                observability::record_report_skipped("unknown_order");
                tracing::warn!(
                    client_order_id = %id,
                    execution_id = %report.execution_id,
                    status_code = %report.status_code,
                    "Execution report for unknown order discarded"
                );
                return ReportDisposition::UnknownOrder;
            }
            Err(e) => {
                tracing::error!(client_order_id = %id, error = %e, "Order lookup failed");
                return ReportDisposition::Ignored {
                    reason: e.message().to_string(),
                };
            }
        };

        let previous = match order.apply_execution_report(&report) {
            Ok(previous) => previous,
            Err(e) => {
                let reason = match &e {
                    OrderError::UnknownStatusCode { .. } => "unknown_status",
                    OrderError::DuplicateExecution { .. } => "duplicate",
                    OrderError::AlreadyTerminal { .. } => "terminal",
                    OrderError::InvalidParameters { .. } => "invalid_report",
                    _ => "invalid_transition",
                };
                observability::record_report_skipped(reason);
                tracing::warn!(
                    client_order_id = %id,
                    execution_id = %report.execution_id,
                    status_code = %report.status_code,
                    current_status = %order.status(),
                    error = %e,
                    "Execution report ignored"
                );
                return ReportDisposition::Ignored {
                    reason: e.to_string(),
                };
            }
        };

        let status = order.status();
        observability::record_execution_applied(&status.to_string());
        tracing::info!(
            client_order_id = %id,
            execution_id = %report.execution_id,
            from = %previous,
            to = %status,
            cumulative_quantity = %order.executed_quantity(),
            "Execution report applied"
        );

        if status.is_fill() {
            if let Err(e) = self.settlement.settle(&mut order).await {
                tracing::error!(client_order_id = %id, error = %e, "Settlement failed");
                order.add_note(format!("Settlement failed: {}", e.message()));
            }
        }
        if matches!(status, OrderStatus::Canceled | OrderStatus::Rejected) {
            if let Err(e) = self.settlement.release(&mut order).await {
                tracing::error!(client_order_id = %id, error = %e, "Release failed");
                order.add_note(format!("Release failed: {}", e.message()));
            }
        }

        let archived = if status.is_terminal() {
            match self.lifecycle.archive(&order).await {
                Ok(archived) => archived,
                Err(e) => {
                    tracing::error!(client_order_id = %id, error = %e, "Failed to archive order");
                    false
                }
            }
        } else {
            if let Err(e) = self.lifecycle.save(&order).await {
                tracing::error!(client_order_id = %id, error = %e, "Failed to save order");
            }
            false
        };

        self.lifecycle.publish(&mut order).await;
        ReportDisposition::Applied { status, archived }
    }
}
