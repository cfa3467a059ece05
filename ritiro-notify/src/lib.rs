//! Daily reminder scheduling, dispatch, and the mark-collected action path
//! for the ritiro waste-pickup tracker.

/// Notification-action routing and the `set_collected` handler.
pub mod action;
/// The once-a-day reminder loop.
pub mod daemon;
/// Reminder construction and dispatch.
pub mod reminder;

pub use action::*;
pub use daemon::*;
pub use reminder::*;
