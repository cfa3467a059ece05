//! Notification-action routing and the `set_collected` service handler.

use serde::Deserialize;
use tracing::{debug, error, info};

use ritiro_core::context::InstanceContext;
use ritiro_core::model::EntityId;

use crate::reminder::ACTION_MARK_COLLECTED;

/// A notification action event as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionEvent {
    /// Identifier of the action the user tapped.
    pub action: String,
}

/// React to a notification action fired by the user.
///
/// A `MARK_COLLECTED` action emits the `set_collected` service call against
/// every entity owned by this instance; other actions are ignored. Firings
/// are unconditionally re-invokable: there is no per-date deduplication.
pub async fn handle_action_event(context: &InstanceContext, event: &ActionEvent) {
    if event.action != ACTION_MARK_COLLECTED {
        debug!(action = %event.action, "ignoring unrelated notification action");
        return;
    }

    let entities = context.entity_ids();
    info!(
        instance = context.instance_id(),
        count = entities.len(),
        "mark-collected action received"
    );

    if let Err(dispatch_error) = context.actions().set_collected(&entities).await {
        error!(%dispatch_error, "failed to emit set_collected");
    }
}

/// Handler for the exposed `set_collected` service.
///
/// Accepts one or many entity ids and acknowledges the call; no behavior
/// beyond the acknowledgement is guaranteed.
pub fn acknowledge_set_collected(entities: &[EntityId]) {
    for entity in entities {
        info!(entity = %entity, "marked as collected");
    }
}
