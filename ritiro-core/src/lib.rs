//! Core types, schedule resolution, and host-port wiring for the ritiro
//! waste-pickup tracker.

/// Raw instance configuration and its derived forms.
pub mod config;
/// Per-instance context replacing global registries.
pub mod context;
/// Domain models shared by every component.
pub mod model;
/// Traits describing the host-platform collaborators.
pub mod ports;
/// Pure schedule-resolution primitives.
pub mod resolver;
/// Configuration-bound lookup facade.
pub mod service;

pub use config::*;
pub use context::*;
pub use model::*;
pub use ports::*;
pub use resolver::*;
pub use service::*;
