//! Entity adapters for the ritiro waste-pickup tracker: sensor snapshots,
//! the calendar feed, and icon asset enumeration.

/// Icon image enumeration and per-label icon selection.
pub mod assets;
/// All-day calendar events over a queried date range.
pub mod calendar;
/// Aggregate and per-label sensor snapshots.
pub mod sensor;

pub use assets::*;
pub use calendar::*;
pub use sensor::*;
