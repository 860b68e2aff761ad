//! Order State Machine Service
//!
//! Validates lifecycle transitions.

use crate::domain::order_execution::errors::OrderError;
use crate::domain::order_execution::value_objects::OrderStatus;

/// Order State Machine for validating transitions.
///
/// `PendingNew` may go straight to `Filled` when the reserve covers the
/// whole instruction, or to `Canceled` when canceled before routing.
/// `New -> New` accepts repeated acknowledgements from the market.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Check if a state transition is valid.
    #[must_use]
    pub const fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            // From PendingNew
            (OrderStatus::PendingNew, OrderStatus::New)
                | (OrderStatus::PendingNew, OrderStatus::Filled)
                | (OrderStatus::PendingNew, OrderStatus::Rejected)
                | (OrderStatus::PendingNew, OrderStatus::Canceled)
                // From New
                | (OrderStatus::New, OrderStatus::New)
                | (OrderStatus::New, OrderStatus::PartiallyFilled)
                | (OrderStatus::New, OrderStatus::Filled)
                | (OrderStatus::New, OrderStatus::Canceled)
                | (OrderStatus::New, OrderStatus::Rejected)
                // From PartiallyFilled
                | (OrderStatus::PartiallyFilled, OrderStatus::PartiallyFilled)
                | (OrderStatus::PartiallyFilled, OrderStatus::Filled)
                | (OrderStatus::PartiallyFilled, OrderStatus::Canceled)
        )
    }

    /// Validate a state transition.
    ///
    /// # Errors
    ///
    /// Returns error if the transition is invalid.
    pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(OrderError::InvalidStateTransition {
                from,
                to,
                reason: Self::transition_error_reason(from, to),
            })
        }
    }

    /// Get a human-readable reason for an invalid transition.
    #[must_use]
    pub fn transition_error_reason(from: OrderStatus, to: OrderStatus) -> String {
        match from {
            OrderStatus::Filled => format!("Order is already filled, cannot transition to {to}"),
            OrderStatus::Canceled => format!("Order is canceled, cannot transition to {to}"),
            OrderStatus::Rejected => format!("Order was rejected, cannot transition to {to}"),
            _ => format!("Invalid transition from {from} to {to}"),
        }
    }
}
