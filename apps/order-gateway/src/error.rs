//! Boundary errors for the gateway.
//!
//! Every failure an instruction can meet is turned into a [`GatewayError`]
//! and then into a `Rejected` response; nothing propagates to the caller
//! as a raw error.
//!
//! | Code | Usage |
//! |------|-------|
//! | `INVALID_INSTRUCTION` | Missing or malformed instruction fields |
//! | `INSUFFICIENT_CASH` | Reserve cannot cover the cash portion |
//! | `ROUTING_FAILED` | Market declined or was unreachable |
//! | `ROUTING_TIMEOUT` | Market did not answer in time |
//! | `ORDER_NOT_FOUND` | Cancel for an order not in flight |
//! | `DUPLICATE_ORDER_ID` | Client order ID already in flight |
//! | `INTERNAL_ERROR` | Unexpected failure |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::MarketError;
use crate::domain::order_execution::OrderError;
use crate::domain::reconciliation::ReconciliationError;
use crate::domain::shared::{DomainError, RepositoryError};

/// Error codes returned to the instruction originator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or malformed instruction fields.
    InvalidInstruction,
    /// Reserve cannot cover the cash portion.
    InsufficientCash,
    /// Market declined or was unreachable.
    RoutingFailed,
    /// Market did not answer in time.
    RoutingTimeout,
    /// Order not in flight.
    OrderNotFound,
    /// Client order ID already in flight.
    DuplicateOrderId,
    /// Unexpected failure.
    InternalError,
}

impl ErrorCode {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidInstruction => "INVALID_INSTRUCTION",
            Self::InsufficientCash => "INSUFFICIENT_CASH",
            Self::RoutingFailed => "ROUTING_FAILED",
            Self::RoutingTimeout => "ROUTING_TIMEOUT",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::DuplicateOrderId => "DUPLICATE_ORDER_ID",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A gateway error with a code and context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct GatewayError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl GatewayError {
    /// Create a new gateway error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

/// Convenience constructors for common errors.
impl GatewayError {
    /// Invalid instruction.
    #[must_use]
    pub fn invalid_instruction(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInstruction, message)
    }

    /// Order not in flight.
    #[must_use]
    pub fn order_not_found(order_id: &str) -> Self {
        Self::new(ErrorCode::OrderNotFound, "order not found").with_context("order_id", order_id)
    }

    /// Client order ID reused while in flight.
    #[must_use]
    pub fn duplicate_order_id(order_id: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateOrderId,
            format!("Order {order_id} is already in flight"),
        )
        .with_context("order_id", order_id)
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<MarketError> for GatewayError {
    fn from(err: MarketError) -> Self {
        let code = match err {
            MarketError::Timeout { .. } => ErrorCode::RoutingTimeout,
            _ => ErrorCode::RoutingFailed,
        };
        Self::new(code, err.to_string())
    }
}

impl From<ReconciliationError> for GatewayError {
    fn from(err: ReconciliationError) -> Self {
        let code = match err {
            ReconciliationError::InsufficientCash { .. } => ErrorCode::InsufficientCash,
            ReconciliationError::AmountMismatch { .. }
            | ReconciliationError::AmountOverflow(_)
            | ReconciliationError::InvalidPrice(_) => ErrorCode::InvalidInstruction,
            ReconciliationError::Reserve(_) => ErrorCode::InternalError,
        };
        Self::new(code, err.to_string())
    }
}

impl From<OrderError> for GatewayError {
    fn from(err: OrderError) -> Self {
        let code = match err {
            OrderError::InvalidParameters { .. } | OrderError::Domain(_) => {
                ErrorCode::InvalidInstruction
            }
            _ => ErrorCode::InternalError,
        };
        Self::new(code, err.to_string())
    }
}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        Self::invalid_instruction(err.to_string())
    }
}

impl From<RepositoryError> for GatewayError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate { key } => Self::duplicate_order_id(&key),
            other => Self::internal(other.to_string()),
        }
    }
}
