//! Order Gateway Binary
//!
//! Reads tag=value messages from stdin, one per line, and writes one
//! response per line to stdout. Orders route to the paper market, whose
//! execution reports are fed back into the gateway in the background.
//!
//! # Usage
//!
//! ```bash
//! echo '35=D|1=ACC-1|55=AAPL|11=ord-1|54=2|38=2.5' | cargo run --bin order-gateway
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_GATEWAY_CONFIG`: Config file path (default: config.yaml)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`

use std::sync::Arc;

use anyhow::Context;
use order_gateway::application::use_cases::ApplyExecutionReportUseCase;
use order_gateway::config::{Config, load_config};
use order_gateway::domain::order_execution::ExecutionReport;
use order_gateway::infrastructure::config::Container;
use order_gateway::infrastructure::notification::LoggingNotifier;
use order_gateway::infrastructure::persistence::{
    InMemoryOrderHistory, InMemoryOrderRepository, InMemoryReserveRepository,
};
use order_gateway::infrastructure::session::{SessionState, serve};
use order_gateway::telemetry::init_telemetry;
use tokio::io::BufReader;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Concrete type alias for the execution report use case.
type ConcreteApplyReportUseCase = ApplyExecutionReportUseCase<
    InMemoryOrderRepository,
    InMemoryOrderHistory,
    InMemoryReserveRepository,
    LoggingNotifier,
>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config(None).context("failed to load configuration")?;
    init_telemetry(&config.observability.logging).context("failed to initialize tracing")?;

    tracing::info!("Starting order gateway");
    log_config(&config);

    let (container, reports) = Container::paper(config, Arc::new(LoggingNotifier));
    let state = SessionState::from_container(&container);
    let feedback = spawn_report_feedback(Arc::clone(&state.apply), reports);

    tracing::info!("Order gateway ready");

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    tokio::select! {
        result = serve(state, stdin, stdout) => {
            result.context("session I/O failed")?;
        }
        result = signal::ctrl_c() => {
            result.context("failed to listen for Ctrl+C")?;
            tracing::info!("Received Ctrl+C, shutting down");
        }
    }

    feedback.abort();
    tracing::info!(
        in_flight = container.orders().len(),
        open_at_market = container.market().open_orders(),
        archived = container.history().len().await,
        accounts = container.reserves().account_count(),
        "Order gateway stopped"
    );
    Ok(())
}

/// Log the loaded configuration.
fn log_config(config: &Config) {
    tracing::info!(
        routing_timeout_ms = config.gateway.routing_timeout_ms,
        default_price = %config.gateway.default_price,
        reference_prices = config.gateway.prices.len(),
        initial_balance = %config.reserves.initial_balance,
        low_balance_threshold = %config.reserves.low_balance_threshold,
        max_per_order = %config.reserves.max_per_order,
        fill_delay_ms = config.market.fill_delay_ms,
        "Configuration loaded"
    );
}

/// Apply paper market reports in arrival order.
fn spawn_report_feedback(
    apply: Arc<ConcreteApplyReportUseCase>,
    mut reports: mpsc::UnboundedReceiver<ExecutionReport>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(report) = reports.recv().await {
            let client_order_id = report.client_order_id.clone();
            let disposition = apply.execute(report).await;
            tracing::debug!(%client_order_id, ?disposition, "Market report processed");
        }
    })
}
