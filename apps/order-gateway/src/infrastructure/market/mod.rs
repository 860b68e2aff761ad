//! Market Venue Adapters
//!
//! `PaperMarket` simulates a venue: it acknowledges orders, fills them at
//! the reference price after a delay and reports back over a channel.

mod config;
mod paper;

pub use config::PaperMarketConfig;
pub use paper::PaperMarket;
