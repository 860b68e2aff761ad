//! Order execution errors.

use thiserror::Error;

use super::value_objects::OrderStatus;
use crate::domain::shared::DomainError;

/// Errors that can occur while driving an order through its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Invalid state transition attempted.
    #[error("Invalid order state transition: {from} -> {to}: {reason}")]
    InvalidStateTransition {
        /// Current order status.
        from: OrderStatus,
        /// Attempted status.
        to: OrderStatus,
        /// Reason for failure.
        reason: String,
    },

    /// Invalid order parameters.
    #[error("Invalid order parameter '{field}': {message}")]
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// Execution report carried a status code the gateway does not map.
    #[error("Unrecognized order status code '{code}' for order {order_id}")]
    UnknownStatusCode {
        /// Order ID.
        order_id: String,
        /// Raw status code.
        code: String,
    },

    /// Execution report was already applied.
    #[error("Execution {execution_id} already applied to order {order_id}")]
    DuplicateExecution {
        /// Order ID.
        order_id: String,
        /// Execution ID.
        execution_id: String,
    },

    /// Order already reached a terminal state.
    #[error("Order {order_id} is already {status}")]
    AlreadyTerminal {
        /// Order ID.
        order_id: String,
        /// Terminal status.
        status: OrderStatus,
    },

    /// Order cannot be canceled in its current state.
    #[error("Cannot cancel order in status: {status}")]
    CannotCancel {
        /// Current status.
        status: OrderStatus,
    },

    /// Value object validation failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl OrderError {
    /// Shorthand for [`OrderError::InvalidParameters`].
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            field: field.into(),
            message: message.into(),
        }
    }
}
