//! Paper venue.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;

use super::PaperMarketConfig;
use crate::application::ports::{
    MarketAck, MarketCancelRequest, MarketError, MarketOrderRequest, MarketRoutingPort,
    PriceOraclePort,
};
use crate::application::services::ReferencePriceService;
use crate::domain::order_execution::{ExecutionReport, InstructionAmount, OrderStatus};
use crate::domain::shared::{ExecutionId, MarketOrderId, Money, OrderId, Quantity, Timestamp};

/// Simulated venue that fills every accepted order in one execution.
pub struct PaperMarket<P: PriceOraclePort + 'static> {
    config: PaperMarketConfig,
    prices: Arc<ReferencePriceService<P>>,
    reports: mpsc::UnboundedSender<ExecutionReport>,
    sequence: Arc<AtomicU64>,
    open: Arc<DashMap<OrderId, MarketOrderId>>,
}

impl<P: PriceOraclePort + 'static> PaperMarket<P> {
    /// Create a venue and the receiver for its execution reports.
    #[must_use]
    pub fn new(
        config: PaperMarketConfig,
        prices: Arc<ReferencePriceService<P>>,
    ) -> (Self, mpsc::UnboundedReceiver<ExecutionReport>) {
        let (reports, rx) = mpsc::unbounded_channel();
        let market = Self {
            config,
            prices,
            reports,
            sequence: Arc::new(AtomicU64::new(0)),
            open: Arc::new(DashMap::new()),
        };
        (market, rx)
    }

    /// Number of orders working at the venue.
    #[must_use]
    pub fn open_orders(&self) -> usize {
        self.open.len()
    }
}

fn next_id(sequence: &AtomicU64, prefix: &str) -> String {
    format!("{prefix}-{}", sequence.fetch_add(1, Ordering::Relaxed) + 1)
}

#[async_trait]
impl<P: PriceOraclePort + 'static> MarketRoutingPort for PaperMarket<P> {
    async fn submit_order(&self, request: MarketOrderRequest) -> Result<MarketAck, MarketError> {
        if self.config.reject_symbols.contains(&request.symbol) {
            tracing::info!(
                client_order_id = %request.client_order_id,
                symbol = %request.symbol,
                "Paper market refusing symbol"
            );
            return Err(MarketError::Rejected {
                reason: format!("{} is not tradable", request.symbol),
            });
        }

        let market_order_id = MarketOrderId::new(next_id(&self.sequence, "PAPER"));
        self.open
            .insert(request.client_order_id.clone(), market_order_id.clone());
        let ack = MarketAck {
            market_order_id: market_order_id.clone(),
            client_order_id: request.client_order_id.clone(),
        };

        tracing::info!(
            client_order_id = %request.client_order_id,
            market_order_id = %market_order_id,
            symbol = %request.symbol,
            side = ?request.side,
            amount = ?request.amount,
            "Paper market accepted order"
        );

        let reports = self.reports.clone();
        let prices = Arc::clone(&self.prices);
        let open = Arc::clone(&self.open);
        let sequence = Arc::clone(&self.sequence);
        let delay = self.config.fill_delay;

        tokio::spawn(async move {
            let report = |status: OrderStatus, quantity: Quantity, price: Money| ExecutionReport {
                client_order_id: request.client_order_id.clone(),
                market_order_id: Some(market_order_id.clone()),
                execution_id: ExecutionId::new(next_id(&sequence, "PEXEC")),
                status_code: status.fix_tag_value().to_string(),
                cumulative_quantity: quantity,
                last_quantity: quantity,
                last_price: price,
                average_price: price,
                transact_time: Timestamp::now(),
            };

            if reports
                .send(report(OrderStatus::New, Quantity::ZERO, Money::ZERO))
                .is_err()
            {
                return;
            }

            tokio::time::sleep(delay).await;

            // A cancel may have taken the order first.
            if open.remove(&request.client_order_id).is_none() {
                return;
            }
            let price = prices.price_for(&request.symbol).await;
            let quantity = match &request.amount {
                InstructionAmount::Shares(quantity) => *quantity,
                InstructionAmount::Dollars(value) => Quantity::implied(*value, price),
            };
            if reports
                .send(report(OrderStatus::Filled, quantity, price))
                .is_err()
            {
                tracing::debug!(client_order_id = %request.client_order_id, "Report receiver gone");
            }
        });

        Ok(ack)
    }

    async fn cancel_order(&self, request: MarketCancelRequest) -> Result<(), MarketError> {
        let Some((_, market_order_id)) = self.open.remove(&request.original_client_order_id) else {
            return Err(MarketError::OrderNotFound {
                order_id: request.original_client_order_id.to_string(),
            });
        };

        tracing::info!(
            client_order_id = %request.original_client_order_id,
            cancel_client_order_id = %request.cancel_client_order_id,
            market_order_id = %market_order_id,
            "Paper market canceled order"
        );

        let report = ExecutionReport {
            client_order_id: request.original_client_order_id,
            market_order_id: Some(market_order_id),
            execution_id: ExecutionId::new(next_id(&self.sequence, "PEXEC")),
            status_code: OrderStatus::Canceled.fix_tag_value().to_string(),
            cumulative_quantity: Quantity::ZERO,
            last_quantity: Quantity::ZERO,
            last_price: Money::ZERO,
            average_price: Money::ZERO,
            transact_time: Timestamp::now(),
        };
        self.reports
            .send(report)
            .map_err(|_| MarketError::Unavailable {
                message: "report channel closed".to_string(),
            })
    }
}
