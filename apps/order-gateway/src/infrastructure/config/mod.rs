//! Dependency wiring.

mod container;

pub use container::{Container, Lifecycle, Prices, Settlement};
