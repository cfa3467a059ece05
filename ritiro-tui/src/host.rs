//! Log-backed port implementations standing in for the host platform.
//!
//! Real deployments route these calls into the home-automation host; the
//! dashboard only needs them to be visible, so every dispatch is traced.

use async_trait::async_trait;
use tracing::info;

use ritiro_core::model::EntityId;
use ritiro_core::ports::{ActionPort, NotificationPort, NotificationRequest, PortError};
use ritiro_notify::action::acknowledge_set_collected;

pub(crate) struct LogNotificationPort;

#[async_trait]
impl NotificationPort for LogNotificationPort {
    async fn send(&self, request: &NotificationRequest) -> Result<(), PortError> {
        info!(
            service = %request.service,
            title = %request.title,
            message = %request.message,
            action = %request.action_id,
            "notification dispatched"
        );
        Ok(())
    }
}

pub(crate) struct LogActionPort;

#[async_trait]
impl ActionPort for LogActionPort {
    async fn turn_on(&self, entities: &[EntityId]) -> Result<(), PortError> {
        for entity in entities {
            info!(entity = %entity, "turn_on invoked");
        }
        Ok(())
    }

    async fn set_collected(&self, entities: &[EntityId]) -> Result<(), PortError> {
        acknowledge_set_collected(entities);
        Ok(())
    }
}
