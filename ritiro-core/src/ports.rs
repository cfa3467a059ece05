//! Traits describing the host-platform collaborators.
//!
//! Notification delivery and entity actions stay the host's responsibility;
//! these ports are the only suspension points in the system. Failures behind
//! them are reported, logged by the caller, and never corrupt resolver state.

use async_trait::async_trait;

use crate::model::EntityId;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while calling into the host platform.
pub enum PortError {
    /// The notification service rejected or failed the dispatch.
    #[error("Notification dispatch failed: {0}")]
    Notification(String),
    /// An entity action invocation failed.
    #[error("Entity action failed: {0}")]
    Action(String),
    /// Internal host error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A reminder notification to be delivered by the host.
pub struct NotificationRequest {
    /// Target notification service identifier.
    pub service: String,
    /// Notification title.
    pub title: String,
    /// Human-readable reminder text.
    pub message: String,
    /// Action identifier attached to the actionable button.
    pub action_id: String,
}

#[async_trait]
/// Trait for the host's generic "send notification" service.
pub trait NotificationPort: Send + Sync {
    /// Deliver a reminder notification.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the host rejects or fails the dispatch.
    async fn send(&self, request: &NotificationRequest) -> Result<(), PortError>;
}

#[async_trait]
/// Trait for the host's generic entity action services.
pub trait ActionPort: Send + Sync {
    /// Request a "turn on" action against the given entities.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the invocation fails.
    async fn turn_on(&self, entities: &[EntityId]) -> Result<(), PortError>;

    /// Emit the "mark collected" service call against the given entities.
    ///
    /// The handler on the other side acknowledges the call; no further
    /// behavior is guaranteed.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the invocation fails.
    async fn set_collected(&self, entities: &[EntityId]) -> Result<(), PortError>;
}
