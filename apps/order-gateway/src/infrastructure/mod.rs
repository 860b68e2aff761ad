//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `market/`: Paper market venue
//!   - `price_oracle/`: Static end-of-day reference prices
//!   - `notification/`: Logging and channel notifiers
//!   - `persistence/`: In-memory registry, history and reserve store
//!
//! - **Driver Adapters (Inbound)**
//!   - `codec/`: tag=value instruction codec
//!   - `session/`: line-per-message stdin/stdout session
//!
//! - **Wiring**
//!   - `config/`: Dependency injection container

pub mod codec;
pub mod config;
pub mod market;
pub mod notification;
pub mod persistence;
pub mod price_oracle;
pub mod session;
