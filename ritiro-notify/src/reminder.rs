//! Daily reminder construction and dispatch.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use tracing::{debug, error, info};

use ritiro_core::config::InstanceConfig;
use ritiro_core::context::InstanceContext;
use ritiro_core::model::join_labels;
use ritiro_core::ports::NotificationRequest;

/// Action identifier attached to the reminder's "mark collected" button.
pub const ACTION_MARK_COLLECTED: &str = "MARK_COLLECTED";
/// Title of every reminder notification.
pub const NOTIFICATION_TITLE: &str = "Gestione Rifiuti";

/// A validated reminder configuration: where to notify and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPlan {
    /// Target notification service.
    pub service: String,
    /// Daily firing time.
    pub time: NaiveTime,
}

impl ReminderPlan {
    /// Read the reminder settings out of a configuration.
    ///
    /// Returns `None` when reminders are disabled: service or time missing,
    /// or the time string malformed. A malformed time is logged and skipped
    /// rather than failing activation.
    #[must_use]
    pub fn from_config(config: &InstanceConfig) -> Option<Self> {
        let service = config
            .notify_service
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())?
            .to_owned();

        match config.notify_time() {
            Ok(Some(time)) => Some(Self { service, time }),
            Ok(None) => {
                debug!("no notification time configured, reminders disabled");
                None
            }
            Err(error) => {
                error!(%error, "invalid notification time, reminders disabled");
                None
            }
        }
    }

    /// Build the reminder for a firing on `today`, if the target date has a
    /// pickup.
    ///
    /// The target is today for morning firings and tomorrow for afternoon or
    /// evening firings. The check is a direct weekday lookup into the weekly
    /// map; date-keyed exceptions only affect the exposed entities.
    #[must_use]
    pub fn request_for(
        &self,
        config: &InstanceConfig,
        today: NaiveDate,
    ) -> Option<NotificationRequest> {
        let (target, prefix) = reminder_target(today, self.time);
        let schedule = config.weekly_schedule();
        let labels = schedule.for_weekday(target.weekday());
        if labels.is_empty() {
            return None;
        }

        Some(NotificationRequest {
            service: self.service.clone(),
            title: NOTIFICATION_TITLE.to_owned(),
            message: format!(
                "{prefix} ritiro: {}. Ricordati di esporre i rifiuti!",
                join_labels(labels)
            ),
            action_id: ACTION_MARK_COLLECTED.to_owned(),
        })
    }
}

/// Date the reminder talks about, with its phrasing prefix.
///
/// Firing before noon warns about today's pickup, after noon about
/// tomorrow's.
#[must_use]
pub fn reminder_target(today: NaiveDate, fire_time: NaiveTime) -> (NaiveDate, &'static str) {
    if fire_time.hour() >= 12 {
        (today.succ_opt().unwrap_or(today), "Domani")
    } else {
        (today, "Oggi")
    }
}

/// Send the reminder and trigger the configured action entities.
///
/// The two dispatches are independent: each failure is logged on its own and
/// neither aborts the other nor the calling loop.
pub async fn dispatch(context: &InstanceContext, request: &NotificationRequest) {
    if let Err(error) = context.notifications().send(request).await {
        error!(%error, service = %request.service, "failed to send reminder notification");
    }

    let entities = &context.config().action_entities;
    if !entities.is_empty() {
        info!(count = entities.len(), "turning on reminder action entities");
        if let Err(error) = context.actions().turn_on(entities).await {
            error!(%error, "failed to invoke reminder action");
        }
    }
}
