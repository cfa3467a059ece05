//! The once-a-day reminder loop.
//!
//! A single tokio task per instance sleeps until the configured wall-clock
//! time, fires the reminder check, and goes back to sleep until the next
//! day. Dispatch failures are logged inside [`crate::reminder::dispatch`]
//! and never terminate the loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, NaiveTime};
use tracing::{debug, info};

use ritiro_core::context::InstanceContext;

use crate::reminder::{ReminderPlan, dispatch};

/// Next wall-clock instant at which a daily `at` firing is due.
///
/// Today if `at` is still ahead, otherwise the same time tomorrow.
#[must_use]
pub fn next_fire_after(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    if now.time() < at {
        now.date().and_time(at)
    } else {
        now.date()
            .succ_opt()
            .map_or_else(|| now.date().and_time(at), |tomorrow| tomorrow.and_time(at))
    }
}

/// Run the reminder daemon for one instance until the task is dropped.
///
/// Returns immediately when reminders are not configured, so callers can
/// unconditionally spawn this.
pub async fn run(context: Arc<InstanceContext>) {
    let Some(plan) = ReminderPlan::from_config(context.config()) else {
        info!(
            instance = context.instance_id(),
            "reminders disabled, daemon not starting"
        );
        return;
    };

    info!(
        instance = context.instance_id(),
        service = %plan.service,
        time = %plan.time,
        "reminder daemon started"
    );

    loop {
        let now = Local::now().naive_local();
        let fire_at = next_fire_after(now, plan.time);
        let wait = (fire_at - now).to_std().unwrap_or(Duration::ZERO);
        debug!(instance = context.instance_id(), ?wait, "sleeping until next firing");
        tokio::time::sleep(wait).await;

        let today = Local::now().date_naive();
        match plan.request_for(context.config(), today) {
            Some(request) => {
                info!(instance = context.instance_id(), %today, "reminder due");
                dispatch(&context, &request).await;
            }
            None => {
                debug!(
                    instance = context.instance_id(),
                    %today,
                    "no pickup for the reminder target date"
                );
            }
        }
    }
}
