//! Paper Session Integration Tests
//!
//! Feed encoded lines through the session adapter with the paper market
//! wired in, applying the venue's execution reports the way the binary does.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use order_gateway::Container;
use order_gateway::application::ports::NoOpNotifier;
use order_gateway::config::load_config_from_string;
use order_gateway::infrastructure::session::{SessionState, handle_line};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimals serialize as strings; compare by value, not scale.
fn decimal(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("not a decimal: {value}"))
}

const CONFIG: &str = r"
gateway:
  routing_timeout_ms: 500
  prices:
    AAPL: 10
reserves:
  initial_balance: 100
market:
  fill_delay_ms: 5
  reject_symbols: [HALT]
observability:
  logging:
    format: pretty
";

#[tokio::test]
async fn instruction_fills_through_paper_market() {
    let config = load_config_from_string(CONFIG).unwrap();
    let (container, mut reports) = Container::paper(config, Arc::new(NoOpNotifier));
    let state = SessionState::from_container(&container);

    let reply = handle_line(&state, "35=D|1=ACC-1|55=AAPL|11=ord-1|54=2|38=2.5")
        .await
        .unwrap();
    assert!(reply.contains("5001=Y"), "{reply}");

    // New, then Filled.
    for _ in 0..2 {
        let report = tokio::time::timeout(Duration::from_secs(2), reports.recv())
            .await
            .unwrap()
            .unwrap();
        state.apply.execute(report).await;
    }

    let history = handle_line(&state, "35=U3|1=ACC-1").await.unwrap();
    let history: serde_json::Value = serde_json::from_str(&history).unwrap();
    assert_eq!(history[0]["status"], "FILLED");
    assert_eq!(decimal(&history[0]["executed_quantity"]), dec!(2));

    let snapshot = handle_line(&state, "35=U1|1=ACC-1").await.unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(decimal(&snapshot["reserves"][0]["balance"]), dec!(100));
    assert_eq!(decimal(&snapshot["reserves"][0]["pending_reduction"]), dec!(0));
}

#[tokio::test]
async fn refused_symbol_is_rejected_on_the_wire() {
    let config = load_config_from_string(CONFIG).unwrap();
    let (container, _reports) = Container::paper(config, Arc::new(NoOpNotifier));
    let state = SessionState::from_container(&container);

    let reply = handle_line(&state, "35=D|1=ACC-1|55=HALT|11=ord-1|54=2|38=3")
        .await
        .unwrap();

    assert!(reply.starts_with("11=ord-1|5001=N|5002=Rejected"), "{reply}");
    assert!(container.orders().is_empty());
}

#[tokio::test]
async fn cancel_before_fill_releases_reserve() {
    let mut config = load_config_from_string(CONFIG).unwrap();
    config.market.fill_delay_ms = 5_000;
    let (container, mut reports) = Container::paper(config, Arc::new(NoOpNotifier));
    let state = SessionState::from_container(&container);

    handle_line(&state, "35=D|1=ACC-1|55=AAPL|11=ord-1|54=2|152=130")
        .await
        .unwrap();
    let reply = handle_line(&state, "35=F|11=cxl-1|41=ord-1").await.unwrap();
    assert!(reply.contains("58=cancel requested"), "{reply}");

    // The acknowledgement and the cancel confirmation, in either order.
    for _ in 0..2 {
        let report = tokio::time::timeout(Duration::from_secs(2), reports.recv())
            .await
            .unwrap()
            .unwrap();
        state.apply.execute(report).await;
    }

    assert!(container.orders().is_empty());
    let snapshot = handle_line(&state, "35=U1|1=ACC-1").await.unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(decimal(&snapshot["reserves"][0]["balance"]), dec!(100));
    assert_eq!(decimal(&snapshot["reserves"][0]["pending_reduction"]), dec!(0));
}
