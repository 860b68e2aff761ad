//! Application Services
//!
//! Stateful collaborators shared by the use cases.

mod keyed_locks;
mod order_lifecycle;
mod reference_price;
mod settlement;

pub use keyed_locks::{KeyGuard, KeyedLocks};
pub use order_lifecycle::OrderLifecycleManager;
pub use reference_price::ReferencePriceService;
pub use settlement::{Reservation, SettlementService};
