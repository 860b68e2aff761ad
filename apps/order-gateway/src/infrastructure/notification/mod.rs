//! Notification Adapters
//!
//! Implementations of [`NotificationPort`](crate::application::ports::NotificationPort).

mod channel;
mod logging;

pub use crate::application::ports::NoOpNotifier;
pub use channel::ChannelNotifier;
pub use logging::LoggingNotifier;
