//! Cash reserve aggregates.

mod account;
mod reserve;

pub use account::Account;
pub use reserve::{CashReserve, ReserveKey, ReserveLimits};
