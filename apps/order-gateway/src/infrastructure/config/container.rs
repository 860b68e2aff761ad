//! Dependency Injection Container
//!
//! Wires the in-memory stores, the static oracle and the shared lifecycle
//! and settlement services into use cases. The market venue and notifier
//! are supplied by the caller.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{MarketRoutingPort, NotificationPort};
use crate::application::services::{
    OrderLifecycleManager, ReferencePriceService, SettlementService,
};
use crate::application::use_cases::{
    AccountQueryUseCase, ApplyExecutionReportUseCase, CancelOrderUseCase,
    SubmitInstructionUseCase,
};
use crate::config::Config;
use crate::domain::order_execution::ExecutionReport;
use crate::domain::reconciliation::ReconciliationEngine;
use crate::domain::shared::Money;
use crate::infrastructure::market::{PaperMarket, PaperMarketConfig};
use crate::infrastructure::persistence::{
    InMemoryOrderHistory, InMemoryOrderRepository, InMemoryReserveRepository,
};
use crate::infrastructure::price_oracle::StaticPriceOracle;

/// Reference prices backed by the configured static oracle.
pub type Prices = ReferencePriceService<StaticPriceOracle>;

/// Lifecycle manager over the in-memory stores.
pub type Lifecycle<N> = OrderLifecycleManager<InMemoryOrderRepository, InMemoryOrderHistory, N>;

/// Settlement over the in-memory reserve store.
pub type Settlement<N> = SettlementService<InMemoryReserveRepository, N>;

/// Dependency injection container.
pub struct Container<M, N>
where
    M: MarketRoutingPort + 'static,
    N: NotificationPort + 'static,
{
    config: Config,
    market: Arc<M>,
    prices: Arc<Prices>,
    orders: Arc<InMemoryOrderRepository>,
    history: Arc<InMemoryOrderHistory>,
    reserves: Arc<InMemoryReserveRepository>,
    lifecycle: Arc<Lifecycle<N>>,
    settlement: Arc<Settlement<N>>,
}

impl<N: NotificationPort + 'static> Container<PaperMarket<StaticPriceOracle>, N> {
    /// Wire against the paper market and return its execution report stream.
    pub fn paper(
        config: Config,
        notifier: Arc<N>,
    ) -> (Self, mpsc::UnboundedReceiver<ExecutionReport>) {
        let prices = Self::reference_prices(&config);
        let market_config = config.market.reject_symbols.iter().fold(
            PaperMarketConfig::with_fill_delay(std::time::Duration::from_millis(
                config.market.fill_delay_ms,
            )),
            |market, symbol| market.rejecting(symbol),
        );
        let (market, reports) = PaperMarket::new(market_config, Arc::clone(&prices));
        (
            Self::assemble(config, Arc::new(market), prices, notifier),
            reports,
        )
    }
}

impl<M, N> Container<M, N>
where
    M: MarketRoutingPort + 'static,
    N: NotificationPort + 'static,
{
    /// Wire against a caller-supplied market venue.
    pub fn new(config: Config, market: Arc<M>, notifier: Arc<N>) -> Self {
        let prices = Self::reference_prices(&config);
        Self::assemble(config, market, prices, notifier)
    }

    fn reference_prices(config: &Config) -> Arc<Prices> {
        let oracle = StaticPriceOracle::from_prices(&config.gateway.prices);
        Arc::new(ReferencePriceService::new(
            Arc::new(oracle),
            Money::new(config.gateway.default_price),
        ))
    }

    fn assemble(config: Config, market: Arc<M>, prices: Arc<Prices>, notifier: Arc<N>) -> Self {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let history = Arc::new(InMemoryOrderHistory::new());
        let reserves = Arc::new(InMemoryReserveRepository::new());

        let lifecycle = Arc::new(OrderLifecycleManager::new(
            Arc::clone(&orders),
            Arc::clone(&history),
            Arc::clone(&notifier),
        ));
        let settlement = Arc::new(SettlementService::new(
            Arc::clone(&reserves),
            notifier,
            config.reserves.limits(),
            ReconciliationEngine::default(),
        ));

        Self {
            config,
            market,
            prices,
            orders,
            history,
            reserves,
            lifecycle,
            settlement,
        }
    }

    /// Loaded configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Get the market port.
    pub fn market(&self) -> Arc<M> {
        Arc::clone(&self.market)
    }

    /// Get the in-flight order registry.
    pub fn orders(&self) -> Arc<InMemoryOrderRepository> {
        Arc::clone(&self.orders)
    }

    /// Get the order archive.
    pub fn history(&self) -> Arc<InMemoryOrderHistory> {
        Arc::clone(&self.history)
    }

    /// Get the reserve store.
    pub fn reserves(&self) -> Arc<InMemoryReserveRepository> {
        Arc::clone(&self.reserves)
    }

    /// Create a `SubmitInstructionUseCase`.
    pub fn submit_instruction_use_case(
        &self,
    ) -> SubmitInstructionUseCase<
        M,
        StaticPriceOracle,
        InMemoryOrderRepository,
        InMemoryOrderHistory,
        InMemoryReserveRepository,
        N,
    > {
        SubmitInstructionUseCase::new(
            Arc::clone(&self.market),
            Arc::clone(&self.prices),
            Arc::clone(&self.lifecycle),
            Arc::clone(&self.settlement),
            self.config.gateway.routing_timeout(),
        )
    }

    /// Create an `ApplyExecutionReportUseCase`.
    pub fn apply_execution_report_use_case(
        &self,
    ) -> ApplyExecutionReportUseCase<
        InMemoryOrderRepository,
        InMemoryOrderHistory,
        InMemoryReserveRepository,
        N,
    > {
        ApplyExecutionReportUseCase::new(Arc::clone(&self.lifecycle), Arc::clone(&self.settlement))
    }

    /// Create a `CancelOrderUseCase`.
    pub fn cancel_order_use_case(
        &self,
    ) -> CancelOrderUseCase<
        M,
        InMemoryOrderRepository,
        InMemoryOrderHistory,
        InMemoryReserveRepository,
        N,
    > {
        CancelOrderUseCase::new(
            Arc::clone(&self.market),
            Arc::clone(&self.lifecycle),
            Arc::clone(&self.settlement),
            self.config.gateway.routing_timeout(),
        )
    }

    /// Create an `AccountQueryUseCase`.
    pub fn account_query_use_case(
        &self,
    ) -> AccountQueryUseCase<InMemoryOrderRepository, InMemoryOrderHistory, InMemoryReserveRepository>
    {
        AccountQueryUseCase::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.history),
            Arc::clone(&self.reserves),
        )
    }
}
