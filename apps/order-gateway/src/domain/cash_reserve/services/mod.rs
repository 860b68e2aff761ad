//! Cash reserve domain services.

mod threshold_monitor;

pub use threshold_monitor::{ThresholdCheck, ThresholdMonitor};
