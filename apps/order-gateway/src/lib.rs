// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Order Gateway - Rust Core Library
//!
//! Sits between an order-management source and a market venue. Each
//! account keeps a cash reserve per instrument; the gateway decides how
//! much of an order that reserve covers, routes the remainder to the
//! market, and settles the reserve from execution reports.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `order_execution`: Order aggregate, status lifecycle, fills
//!   - `cash_reserve`: Per-instrument cash reserves and low-balance monitoring
//!   - `reconciliation`: Market/reserve split per trade type, fill settlement
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`MarketRoutingPort`, `PriceOraclePort`)
//!   - `services`: Keyed locks, order lifecycle, reserve settlement
//!   - `use_cases`: `SubmitInstruction`, `ApplyExecutionReport`, `CancelOrder`, `AccountQuery`
//!   - `dto`: Data transfer objects for the session boundary
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `codec`: tag=value instruction codec
//!   - `market`: Paper market venue
//!   - `persistence`: In-memory registry, history and reserve store
//!   - `session`: Line-per-message session over stdin/stdout
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// Boundary error type and error codes.
pub mod error;

/// Metrics counters.
pub mod observability;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::cash_reserve::{Account, CashReserve, ReserveKey};
pub use domain::order_execution::{Order, OrderSide, OrderStatus, TradeType};
pub use domain::shared::{AccountId, Money, OrderId, Quantity, Symbol, Timestamp};

// Application re-exports
pub use application::dto::{CancelInstruction, Instruction, InstructionResponse};
pub use application::ports::{MarketError, MarketRoutingPort, NotificationPort, PriceOraclePort};
pub use application::use_cases::{
    AccountQueryUseCase, ApplyExecutionReportUseCase, CancelOrderUseCase,
    SubmitInstructionUseCase,
};

// Infrastructure re-exports
pub use error::{ErrorCode, GatewayError};
pub use infrastructure::config::Container;
pub use infrastructure::market::PaperMarket;
