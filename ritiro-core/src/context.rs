//! Per-instance context owning configuration and host ports.
//!
//! Replaces the process-wide registry keyed by opaque entry ids: whatever
//! supervises the integration's lifecycle owns exactly one context per
//! configured instance, and the action callback resolves entity ids through
//! it instead of scanning global state.

use std::sync::Arc;

use crate::config::InstanceConfig;
use crate::model::EntityId;
use crate::ports::{ActionPort, NotificationPort};

/// Everything one configured instance needs to operate.
pub struct InstanceContext {
    instance_id: String,
    config: InstanceConfig,
    notifications: Arc<dyn NotificationPort>,
    actions: Arc<dyn ActionPort>,
}

impl InstanceContext {
    /// Bind a configuration to its host ports under a unique instance id.
    #[must_use]
    pub fn new(
        instance_id: impl Into<String>,
        config: InstanceConfig,
        notifications: Arc<dyn NotificationPort>,
        actions: Arc<dyn ActionPort>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            config,
            notifications,
            actions,
        }
    }

    /// Identifier distinguishing this instance from siblings.
    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// The raw configuration this instance was activated with.
    #[must_use]
    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    /// Port used to dispatch reminder notifications.
    #[must_use]
    pub fn notifications(&self) -> &dyn NotificationPort {
        self.notifications.as_ref()
    }

    /// Port used to invoke entity actions.
    #[must_use]
    pub fn actions(&self) -> &dyn ActionPort {
        self.actions.as_ref()
    }

    /// Ids of every entity this instance exposes: the aggregate sensor, one
    /// sensor per distinct label, and the calendar feed.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids = vec![
            EntityId(format!("sensor.{}_next_pickup", self.instance_id)),
            EntityId(format!("calendar.{}_calendario", self.instance_id)),
        ];
        for label in self.config.unique_labels() {
            ids.push(EntityId(format!(
                "sensor.{}_{}",
                self.instance_id,
                slugify(label.as_str())
            )));
        }
        ids
    }
}

/// Lowercase a label and replace whitespace for use inside an entity id.
#[must_use]
pub fn slugify(label: &str) -> String {
    label.trim().to_lowercase().replace(char::is_whitespace, "_")
}
