//! Application Ports (Driven)
//!
//! Interfaces to the market venue, upstream notifications and prices.

mod market_port;
mod notification_port;
mod price_oracle_port;

pub use market_port::{
    MarketAck, MarketCancelRequest, MarketError, MarketOrderRequest, MarketRoutingPort,
};
pub use notification_port::{NoOpNotifier, Notification, NotificationError, NotificationPort};
pub use price_oracle_port::{PriceOracleError, PriceOraclePort};
