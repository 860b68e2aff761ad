//! Session Controller (Driver Adapter)

use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::application::dto::InstructionResponse;
use crate::application::ports::{MarketRoutingPort, NotificationPort};
use crate::application::use_cases::{
    AccountQueryUseCase, ApplyExecutionReportUseCase, CancelOrderUseCase,
    SubmitInstructionUseCase,
};
use crate::error::GatewayError;
use crate::infrastructure::codec::{self, InboundMessage};
use crate::infrastructure::config::Container;
use crate::infrastructure::persistence::{
    InMemoryOrderHistory, InMemoryOrderRepository, InMemoryReserveRepository,
};
use crate::infrastructure::price_oracle::StaticPriceOracle;

type Submit<M, N> = SubmitInstructionUseCase<
    M,
    StaticPriceOracle,
    InMemoryOrderRepository,
    InMemoryOrderHistory,
    InMemoryReserveRepository,
    N,
>;
type Cancel<M, N> = CancelOrderUseCase<
    M,
    InMemoryOrderRepository,
    InMemoryOrderHistory,
    InMemoryReserveRepository,
    N,
>;
type Apply<N> = ApplyExecutionReportUseCase<
    InMemoryOrderRepository,
    InMemoryOrderHistory,
    InMemoryReserveRepository,
    N,
>;
type Query = AccountQueryUseCase<InMemoryOrderRepository, InMemoryOrderHistory, InMemoryReserveRepository>;

/// Use cases shared by every line handled in a session.
pub struct SessionState<M, N>
where
    M: MarketRoutingPort + 'static,
    N: NotificationPort + 'static,
{
    /// Use case for new instructions.
    pub submit: Arc<Submit<M, N>>,
    /// Use case for cancels.
    pub cancel: Arc<Cancel<M, N>>,
    /// Use case for execution reports.
    pub apply: Arc<Apply<N>>,
    /// Read-only account queries.
    pub query: Arc<Query>,
}

impl<M, N> SessionState<M, N>
where
    M: MarketRoutingPort + 'static,
    N: NotificationPort + 'static,
{
    /// Build the session's use cases from the container.
    pub fn from_container(container: &Container<M, N>) -> Self {
        Self {
            submit: Arc::new(container.submit_instruction_use_case()),
            cancel: Arc::new(container.cancel_order_use_case()),
            apply: Arc::new(container.apply_execution_report_use_case()),
            query: Arc::new(container.account_query_use_case()),
        }
    }
}

impl<M, N> Clone for SessionState<M, N>
where
    M: MarketRoutingPort + 'static,
    N: NotificationPort + 'static,
{
    fn clone(&self) -> Self {
        Self {
            submit: Arc::clone(&self.submit),
            cancel: Arc::clone(&self.cancel),
            apply: Arc::clone(&self.apply),
            query: Arc::clone(&self.query),
        }
    }
}

/// Handle one line. Blank lines produce no response.
pub async fn handle_line<M, N>(state: &SessionState<M, N>, line: &str) -> Option<String>
where
    M: MarketRoutingPort + 'static,
    N: NotificationPort + 'static,
{
    if line.trim().is_empty() {
        return None;
    }

    let message = match codec::decode(line) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(error = %e, "Undecodable message");
            let error = GatewayError::from(e);
            return Some(codec::encode_response(&InstructionResponse::rejected("", &error)));
        }
    };

    let reply = match message {
        InboundMessage::NewInstruction(instruction) => {
            codec::encode_response(&state.submit.execute(instruction).await)
        }
        InboundMessage::Cancel(cancel) => {
            codec::encode_response(&state.cancel.execute(cancel).await)
        }
        InboundMessage::ExecutionReport(report) => {
            let client_order_id = report.client_order_id.clone();
            let disposition = state.apply.execute(report.into_domain()).await;
            to_json(&serde_json::json!({
                "client_order_id": client_order_id,
                "result": disposition,
            }))
        }
        InboundMessage::AccountSnapshot { account_id } => {
            query_json(state.query.snapshot(&account_id).await)
        }
        InboundMessage::PendingOrders { account_id } => {
            query_json(state.query.pending_orders(&account_id).await)
        }
        InboundMessage::TradeHistory { account_id } => {
            query_json(state.query.trade_history(&account_id).await)
        }
    };
    Some(reply)
}

/// Read lines until EOF, writing one response per handled line.
///
/// # Errors
///
/// Returns the first I/O error on either stream.
pub async fn serve<M, N, R, W>(
    state: SessionState<M, N>,
    reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    M: MarketRoutingPort + 'static,
    N: NotificationPort + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(reply) = handle_line(&state, &line).await {
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }
    tracing::info!("Input closed");
    Ok(())
}

fn query_json<T: Serialize>(result: Result<T, GatewayError>) -> String {
    match result {
        Ok(value) => to_json(&value),
        Err(e) => error_json(&e),
    }
}

fn error_json(error: &GatewayError) -> String {
    serde_json::json!({
        "error": error.code(),
        "message": error.message(),
    })
    .to_string()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| error_json(&GatewayError::internal(e.to_string())))
}
