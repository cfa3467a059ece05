//! High-level lookup facade binding the resolver to a configuration.

use chrono::NaiveDate;

use crate::config::InstanceConfig;
use crate::model::{DateRange, Occurrence};
use crate::resolver;

/// Lookahead used for the aggregate "next pickup" view.
pub const AGGREGATE_LOOKAHEAD_DAYS: u32 = 15;
/// Lookahead used for per-label views.
pub const LABEL_LOOKAHEAD_DAYS: u32 = 30;
/// Maximum entries in the upcoming-schedule attribute.
pub const UPCOMING_LIMIT: usize = 5;

/// Borrow of a configuration answering schedule questions.
///
/// The weekly map and the overrides are re-derived on every call; nothing is
/// cached between calls, by design.
pub struct PickupPlanner<'cfg> {
    config: &'cfg InstanceConfig,
}

impl<'cfg> PickupPlanner<'cfg> {
    /// Bind the planner to a configuration.
    #[must_use]
    pub fn new(config: &'cfg InstanceConfig) -> Self {
        Self { config }
    }

    /// The next pickup of any label, if one exists within the aggregate
    /// lookahead window.
    #[must_use]
    pub fn next_pickup(&self, today: NaiveDate) -> Option<Occurrence> {
        resolver::next_occurrence(
            today,
            &self.config.weekly_schedule(),
            &self.config.exception_overrides(),
            AGGREGATE_LOOKAHEAD_DAYS,
            None,
        )
    }

    /// The next pickup including the given label, searched over the wider
    /// per-label window.
    #[must_use]
    pub fn next_for_label(&self, today: NaiveDate, label: &str) -> Option<Occurrence> {
        resolver::next_occurrence(
            today,
            &self.config.weekly_schedule(),
            &self.config.exception_overrides(),
            LABEL_LOOKAHEAD_DAYS,
            Some(label),
        )
    }

    /// Bounded upcoming-schedule list for the aggregate sensor attribute.
    #[must_use]
    pub fn upcoming(&self, today: NaiveDate) -> Vec<Occurrence> {
        resolver::upcoming(
            today,
            &self.config.weekly_schedule(),
            &self.config.exception_overrides(),
            AGGREGATE_LOOKAHEAD_DAYS,
            UPCOMING_LIMIT,
        )
    }

    /// Every pickup within an arbitrary inclusive date range, for the
    /// calendar feed. `days_until` is relative to the range start.
    #[must_use]
    pub fn occurrences_between(&self, range: DateRange) -> Vec<Occurrence> {
        let span = (range.end - range.start).num_days() + 1;
        let Ok(lookahead) = u32::try_from(span) else {
            // Empty or inverted range.
            return Vec::new();
        };
        resolver::resolve(
            range.start,
            &self.config.weekly_schedule(),
            &self.config.exception_overrides(),
            lookahead,
            None,
        )
    }
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
    fn next_pickup_honors_the_override() {
        let config = sample_config();
        let planner = PickupPlanner::new(&config);

        // 2021-06-14 is a Monday; Tuesday the 15th is suppressed.
        let next = planner.next_pickup(date(2021, 6, 14)).unwrap();
        assert_eq!(next.date, date(2021, 6, 17));
        assert_eq!(next.days_until, 3);
    }

    #[test]
    fn next_for_label_searches_the_wider_window() {
        let config = InstanceConfig {
            exceptions: "10/07: Ingombranti".to_owned(),
            ..InstanceConfig::default()
        };
        let planner = PickupPlanner::new(&config);

        // Beyond the 15-day aggregate window but inside the 30-day one.
        let next = planner
            .next_for_label(date(2021, 6, 14), "ingombranti")
            .unwrap();
        assert_eq!(next.date, date(2021, 7, 10));
    }

    #[test]
    fn upcoming_is_bounded_and_sorted() {
        let config = sample_config();
        let planner = PickupPlanner::new(&config);
        let upcoming = planner.upcoming(date(2021, 6, 14));

        assert!(upcoming.len() <= UPCOMING_LIMIT);
        assert!(
            upcoming
                .windows(2)
                .all(|pair| pair[0].days_until < pair[1].days_until)
        );
    }

    #[test]
    fn occurrences_between_cover_the_inclusive_range() {
        let config = sample_config();
        let planner = PickupPlanner::new(&config);
        let range = DateRange {
            start: date(2021, 6, 14),
            end: date(2021, 6, 27),
        };
        let occurrences = planner.occurrences_between(range);

        // Two weeks minus the suppressed June 15: Thu 17, Tue 22, Thu 24.
        assert_eq!(occurrences.len(), 3);
        assert!(occurrences.iter().all(|occurrence| {
            occurrence.date >= range.start && occurrence.date <= range.end
        }));
    }

    #[test]
    fn inverted_range_yields_nothing() {
        let config = sample_config();
        let planner = PickupPlanner::new(&config);
        let range = DateRange {
            start: date(2021, 6, 27),
            end: date(2021, 6, 14),
        };
        assert!(planner.occurrences_between(range).is_empty());
    }
}
