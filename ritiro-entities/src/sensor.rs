//! Read-only sensor snapshots exposed to the host platform.
//!
//! These are pure builders: the host owns entity lifecycle and refresh
//! timing, we only compute the state string and attributes it publishes.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use ritiro_core::config::InstanceConfig;
use ritiro_core::model::{Occurrence, WasteLabel, join_labels};
use ritiro_core::service::PickupPlanner;

/// State shown when nothing is scheduled within the lookahead window.
pub const STATE_NOTHING_SCHEDULED: &str = "Nessun ritiro programmato";
/// State shown by a per-label sensor with no upcoming match.
pub const STATE_NOT_PLANNED: &str = "Non programmato";

const ICON_DEFAULT: &str = "mdi:delete-empty";

/// One row of the aggregate sensor's upcoming-schedule attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingEntry {
    /// Pickup date.
    pub date: NaiveDate,
    /// Localized weekday name.
    pub day: String,
    /// Labels collected that day.
    pub waste_types: Vec<String>,
    /// Days between the reference date and the pickup.
    pub days_until: u32,
}

/// Snapshot of the aggregate "next pickup" sensor.
#[derive(Debug, Clone, Serialize)]
pub struct NextPickupSnapshot {
    /// Human-readable state, for example `Plastica (Domani)`.
    pub state: String,
    /// Icon chosen from the upcoming labels.
    pub icon: String,
    /// Joined label string of the next pickup, if any.
    pub waste_type: Option<String>,
    /// Labels of the next pickup.
    pub waste_types: Vec<String>,
    /// Days until the next pickup.
    pub days_until: Option<u32>,
    /// Date of the next pickup.
    pub pickup_date: Option<NaiveDate>,
    /// Bounded list of upcoming pickups.
    pub upcoming_schedule: Vec<UpcomingEntry>,
    /// Echo of the configured collection window start.
    pub collection_start: String,
    /// Echo of the configured collection window end.
    pub collection_end: String,
    /// Per-label icon map (display metadata).
    pub waste_icons: HashMap<String, String>,
    /// Per-label color map (display metadata).
    pub waste_colors: HashMap<String, String>,
}

/// Snapshot of one per-label sensor.
#[derive(Debug, Clone, Serialize)]
pub struct TypeSnapshot {
    /// The label this sensor tracks, original spelling.
    pub label: String,
    /// Human-readable state: `Oggi`, `Domani`, `Tra N giorni`, or
    /// `Non programmato`.
    pub state: String,
    /// Days until the next matching pickup.
    pub days_until: Option<u32>,
    /// Date of the next matching pickup.
    pub pickup_date: Option<NaiveDate>,
    /// Configured display color, when set and not the placeholder.
    pub color: Option<String>,
}

/// Build the aggregate sensor snapshot for a reference date.
#[must_use]
pub fn next_pickup_snapshot(config: &InstanceConfig, today: NaiveDate) -> NextPickupSnapshot {
    let planner = PickupPlanner::new(config);
    let next = planner.next_pickup(today);
    let upcoming_schedule = planner
        .upcoming(today)
        .iter()
        .map(upcoming_entry)
        .collect();

    let (state, icon, waste_type, waste_types, days_until, pickup_date) = match next {
        Some(occurrence) => {
            let joined = join_labels(&occurrence.labels);
            (
                format!("{joined} ({})", relative_phrase(occurrence.days_until)),
                icon_for(&joined),
                Some(joined),
                occurrence
                    .labels
                    .iter()
                    .map(|label| label.as_str().to_owned())
                    .collect(),
                Some(occurrence.days_until),
                Some(occurrence.date),
            )
        }
        None => (
            STATE_NOTHING_SCHEDULED.to_owned(),
            ICON_DEFAULT.to_owned(),
            None,
            Vec::new(),
            None,
            None,
        ),
    };

    NextPickupSnapshot {
        state,
        icon,
        waste_type,
        waste_types,
        days_until,
        pickup_date,
        upcoming_schedule,
        collection_start: config.collection_start.clone(),
        collection_end: config.collection_end.clone(),
        waste_icons: config.waste_icons.clone(),
        waste_colors: config.waste_colors.clone(),
    }
}

/// Build the snapshot of the sensor tracking a single label.
#[must_use]
pub fn type_snapshot(config: &InstanceConfig, today: NaiveDate, label: &WasteLabel) -> TypeSnapshot {
    let planner = PickupPlanner::new(config);
    let next = planner.next_for_label(today, label.as_str());

    match next {
        Some(occurrence) => TypeSnapshot {
            label: label.as_str().to_owned(),
            state: relative_phrase(occurrence.days_until),
            days_until: Some(occurrence.days_until),
            pickup_date: Some(occurrence.date),
            color: config.color_for(label).map(str::to_owned),
        },
        None => TypeSnapshot {
            label: label.as_str().to_owned(),
            state: STATE_NOT_PLANNED.to_owned(),
            days_until: None,
            pickup_date: None,
            color: None,
        },
    }
}

/// Snapshots for every distinct configured label, in stable order.
#[must_use]
pub fn type_snapshots(config: &InstanceConfig, today: NaiveDate) -> Vec<TypeSnapshot> {
    config
        .unique_labels()
        .iter()
        .map(|label| type_snapshot(config, today, label))
        .collect()
}

fn upcoming_entry(occurrence: &Occurrence) -> UpcomingEntry {
    UpcomingEntry {
        date: occurrence.date,
        day: italian_day(occurrence.date.weekday()).to_owned(),
        waste_types: occurrence
            .labels
            .iter()
            .map(|label| label.as_str().to_owned())
            .collect(),
        days_until: occurrence.days_until,
    }
}

/// Relative phrasing used as sensor state.
#[must_use]
pub fn relative_phrase(days_until: u32) -> String {
    match days_until {
        0 => "Oggi".to_owned(),
        1 => "Domani".to_owned(),
        days => format!("Tra {days} giorni"),
    }
}

/// Localized weekday name for attribute rows.
#[must_use]
pub fn italian_day(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Lunedì",
        Weekday::Tue => "Martedì",
        Weekday::Wed => "Mercoledì",
        Weekday::Thu => "Giovedì",
        Weekday::Fri => "Venerdì",
        Weekday::Sat => "Sabato",
        Weekday::Sun => "Domenica",
    }
}

fn icon_for(joined_labels: &str) -> String {
    let lowered = joined_labels.to_lowercase();
    let icon = if lowered.contains("plastica") {
        "mdi:recycle"
    } else if lowered.contains("umido") {
        "mdi:food-apple"
    } else if lowered.contains("carta") {
        "mdi:newspaper"
    } else {
        ICON_DEFAULT
    };
    icon.to_owned()
}
