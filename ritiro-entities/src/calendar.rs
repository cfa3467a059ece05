//! Calendar feed: one all-day event per pickup date in a queried range.

use chrono::NaiveDate;
use serde::Serialize;

use ritiro_core::config::InstanceConfig;
use ritiro_core::model::{DateRange, join_labels};
use ritiro_core::service::PickupPlanner;

/// An all-day calendar event as the host expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    /// Event summary, multiple labels joined into one line.
    pub summary: String,
    /// Longer description repeating the collected labels.
    pub description: String,
    /// First day of the event.
    pub start: NaiveDate,
    /// Day after the event (exclusive, all-day convention).
    pub end: NaiveDate,
}

/// Events for every pickup in the inclusive `range`.
///
/// Dates with several labels produce a single combined event rather than one
/// event per label.
#[must_use]
pub fn events_between(config: &InstanceConfig, range: DateRange) -> Vec<CalendarEvent> {
    let planner = PickupPlanner::new(config);
    planner
        .occurrences_between(range)
        .iter()
        .map(|occurrence| {
            let joined = join_labels(&occurrence.labels);
            CalendarEvent {
                summary: format!("Ritiro: {joined}"),
                description: format!("Raccolta {joined}"),
                start: occurrence.date,
                end: occurrence.date.succ_opt().unwrap_or(occurrence.date),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_config() -> InstanceConfig {
        InstanceConfig {
            tuesday: "Plastica".to_owned(),
            thursday: "Carta, Vetro".to_owned(),
            exceptions: "15/06: Nessuno".to_owned(),
            ..InstanceConfig::default()
        }
    }

    #[test]
    fn one_combined_all_day_event_per_pickup_date() {
        let range = DateRange {
            start: date(2021, 6, 14),
            end: date(2021, 6, 20),
        };
        let events = events_between(&sample_config(), range);

        // Tuesday the 15th is suppressed; only Thursday the 17th remains.
        assert_eq!(events.len(), 1);
        let event = events.first().unwrap();
        assert_eq!(event.summary, "Ritiro: Carta, Vetro");
        assert_eq!(event.description, "Raccolta Carta, Vetro");
        assert_eq!(event.start, date(2021, 6, 17));
        assert_eq!(event.end, date(2021, 6, 18));
    }

    #[test]
    fn empty_schedule_produces_no_events() {
        let range = DateRange {
            start: date(2021, 6, 1),
            end: date(2021, 6, 30),
        };
        assert!(events_between(&InstanceConfig::default(), range).is_empty());
    }
}
