//! Line-oriented session adapter.
//!
//! Inbound adapter reading one encoded message per line and writing one
//! response per line, delegating to application use cases.

mod controller;

pub use controller::{SessionState, handle_line, serve};
