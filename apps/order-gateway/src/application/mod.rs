//! Application Layer
//!
//! Use cases orchestrate the domain against driven ports. Services hold
//! the state shared between use cases: per-key locks, the in-flight
//! registry and reserve settlement.

pub mod dto;
pub mod ports;
pub mod services;
pub mod use_cases;
