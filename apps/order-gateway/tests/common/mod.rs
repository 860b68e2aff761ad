//! Shared integration test fixtures.

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use order_gateway::application::ports::{
    MarketAck, MarketCancelRequest, MarketError, MarketOrderRequest, MarketRoutingPort,
};
use order_gateway::config::Config;
use order_gateway::domain::shared::MarketOrderId;
use order_gateway::infrastructure::notification::ChannelNotifier;
use order_gateway::{Container, Instruction, OrderSide};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Mutex;

/// How the market double answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    /// Acknowledge everything.
    Accept,
    /// Refuse every order and cancel.
    Refuse,
    /// Never answer.
    Hang,
}

/// Market double recording what it was sent.
pub struct ScriptedVenue {
    venue: Venue,
    pub submitted: Mutex<Vec<MarketOrderRequest>>,
    pub cancels: Mutex<Vec<MarketCancelRequest>>,
}

impl ScriptedVenue {
    pub fn new(venue: Venue) -> Self {
        Self {
            venue,
            submitted: Mutex::new(Vec::new()),
            cancels: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MarketRoutingPort for ScriptedVenue {
    async fn submit_order(&self, request: MarketOrderRequest) -> Result<MarketAck, MarketError> {
        match self.venue {
            Venue::Accept => {
                let ack = MarketAck {
                    market_order_id: MarketOrderId::new(format!("X-{}", request.client_order_id)),
                    client_order_id: request.client_order_id.clone(),
                };
                self.submitted.lock().await.push(request);
                Ok(ack)
            }
            Venue::Refuse => Err(MarketError::Rejected {
                reason: "symbol halted".to_string(),
            }),
            Venue::Hang => std::future::pending().await,
        }
    }

    async fn cancel_order(&self, request: MarketCancelRequest) -> Result<(), MarketError> {
        match self.venue {
            Venue::Accept => {
                self.cancels.lock().await.push(request);
                Ok(())
            }
            Venue::Refuse => Err(MarketError::Unavailable {
                message: "session down".to_string(),
            }),
            Venue::Hang => std::future::pending().await,
        }
    }
}

pub type Gateway = Container<ScriptedVenue, ChannelNotifier>;

/// Config with AAPL at 10.00, a 100ms routing timeout and the given
/// opening balance.
pub fn config(initial_balance: Decimal) -> Config {
    let mut config = Config::default();
    config.gateway.routing_timeout_ms = 100;
    config.gateway.prices.insert("AAPL".to_string(), dec!(10));
    config.reserves.initial_balance = initial_balance;
    config
}

/// Wire a gateway and return the notification stream alongside it.
pub fn gateway(
    venue: Venue,
    initial_balance: Decimal,
) -> (
    Gateway,
    tokio::sync::mpsc::UnboundedReceiver<order_gateway::application::ports::Notification>,
) {
    let (notifier, notifications) = ChannelNotifier::channel();
    let container = Container::new(
        config(initial_balance),
        Arc::new(ScriptedVenue::new(venue)),
        Arc::new(notifier),
    );
    (container, notifications)
}

pub fn shares(id: &str, side: OrderSide, quantity: Decimal) -> Instruction {
    Instruction {
        account_id: "ACC-1".to_string(),
        symbol: "AAPL".to_string(),
        client_order_id: id.to_string(),
        side,
        quantity: Some(quantity),
        cash_amount: None,
    }
}

pub fn dollars(id: &str, side: OrderSide, amount: Decimal) -> Instruction {
    Instruction {
        account_id: "ACC-1".to_string(),
        symbol: "AAPL".to_string(),
        client_order_id: id.to_string(),
        side,
        quantity: None,
        cash_amount: Some(amount),
    }
}

/// AAPL reserve `(balance, pending_reduction)` for ACC-1.
pub async fn aapl_reserve(gateway: &Gateway) -> (Decimal, Decimal) {
    let snapshot = gateway
        .account_query_use_case()
        .snapshot("ACC-1")
        .await
        .unwrap()
        .expect("account has traded");
    let reserve = snapshot
        .reserves
        .iter()
        .find(|r| r.symbol == "AAPL")
        .expect("AAPL reserve exists");
    (reserve.balance, reserve.pending_reduction)
}

pub const SETTLE: Duration = Duration::from_millis(500);
