//! Cash Reserve Bounded Context
//!
//! Per-account, per-instrument cash pools that absorb fractional remainders
//! and small trades. `available = balance - pending_reduction` never goes
//! negative through a reservation.

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;

pub use aggregate::{Account, CashReserve, ReserveKey, ReserveLimits};
pub use errors::ReserveError;
pub use events::{BalanceRecovered, LowBalanceAlert, ReserveEvent};
pub use repository::ReserveRepository;
pub use services::{ThresholdCheck, ThresholdMonitor};
