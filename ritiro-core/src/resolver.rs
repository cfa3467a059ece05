//! Pure schedule resolution: weekly map plus date-keyed overrides.
//!
//! Everything here is a deterministic function of its inputs. No I/O, no
//! shared state, safe to call concurrently from any number of entities.

use chrono::{Datelike, Days, NaiveDate};

use crate::model::{DayOverride, ExceptionOverrides, Occurrence, WasteLabel, WeeklySchedule};

/// Labels due on a single date.
///
/// An exception matching `(day, month)` fully replaces the weekday entry,
/// never merges with it; the no-pickup override yields an empty slice.
#[must_use]
pub fn labels_for_date<'a>(
    date: NaiveDate,
    schedule: &'a WeeklySchedule,
    exceptions: &'a ExceptionOverrides,
) -> &'a [WasteLabel] {
    match exceptions.for_date(date) {
        Some(DayOverride::NoPickup) => &[],
        Some(DayOverride::Pickup(labels)) => labels,
        None => schedule.for_weekday(date.weekday()),
    }
}

/// Stream occurrences in strictly increasing `days_until` order.
///
/// Both call modes are built on this: collecting yields the enumeration,
/// taking the first element yields the next pickup, so the two always agree.
pub fn occurrences<'a>(
    reference: NaiveDate,
    schedule: &'a WeeklySchedule,
    exceptions: &'a ExceptionOverrides,
    lookahead_days: u32,
    filter: Option<&'a str>,
) -> impl Iterator<Item = Occurrence> + 'a {
    (0..lookahead_days).filter_map(move |offset| {
        let candidate = reference.checked_add_days(Days::new(u64::from(offset)))?;
        let labels = labels_for_date(candidate, schedule, exceptions);
        if labels.is_empty() {
            return None;
        }
        if let Some(wanted) = filter
            && !labels.iter().any(|label| label.matches(wanted))
        {
            return None;
        }
        Some(Occurrence {
            date: candidate,
            labels: labels.to_vec(),
            days_until: offset,
        })
    })
}

/// Enumerate every occurrence within the lookahead window.
///
/// An empty result means "nothing scheduled", not an error.
#[must_use]
pub fn resolve(
    reference: NaiveDate,
    schedule: &WeeklySchedule,
    exceptions: &ExceptionOverrides,
    lookahead_days: u32,
    filter: Option<&str>,
) -> Vec<Occurrence> {
    occurrences(reference, schedule, exceptions, lookahead_days, filter).collect()
}

/// Stop at the first match: the occurrence with the smallest `days_until`.
#[must_use]
pub fn next_occurrence(
    reference: NaiveDate,
    schedule: &WeeklySchedule,
    exceptions: &ExceptionOverrides,
    lookahead_days: u32,
    filter: Option<&str>,
) -> Option<Occurrence> {
    occurrences(reference, schedule, exceptions, lookahead_days, filter).next()
}

/// Enumerate up to `limit` occurrences within the lookahead window.
#[must_use]
pub fn upcoming(
    reference: NaiveDate,
    schedule: &WeeklySchedule,
    exceptions: &ExceptionOverrides,
    lookahead_days: u32,
    limit: usize,
) -> Vec<Occurrence> {
    occurrences(reference, schedule, exceptions, lookahead_days, None)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::model::parse_labels;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Tuesday "Plastica", Thursday "Carta, Vetro".
    fn sample_schedule() -> WeeklySchedule {
        let mut schedule = WeeklySchedule::new();
        schedule.set(Weekday::Tue, parse_labels("Plastica"));
        schedule.set(Weekday::Thu, parse_labels("Carta, Vetro"));
        schedule
    }

    #[test]
    fn next_occurrence_from_monday_is_tuesday_plastica() {
        // 2021-06-14 is a Monday.
        let reference = date(2021, 6, 14);
        let found = next_occurrence(
            reference,
            &sample_schedule(),
            &ExceptionOverrides::default(),
            7,
            None,
        )
        .unwrap();

        assert_eq!(found.date, date(2021, 6, 15));
        assert_eq!(found.days_until, 1);
        assert_eq!(found.labels, parse_labels("Plastica"));
    }

    #[test]
    fn no_pickup_exception_skips_to_the_following_match() {
        // 2021-06-15 is a Tuesday, suppressed by the override; the next
        // match is Thursday the 17th.
        let reference = date(2021, 6, 14);
        let exceptions = ExceptionOverrides::parse("15/06: Nessuno", "nessuno");
        let found =
            next_occurrence(reference, &sample_schedule(), &exceptions, 7, None).unwrap();

        assert_eq!(found.date, date(2021, 6, 17));
        assert_eq!(found.days_until, 3);
        assert_eq!(found.labels, parse_labels("Carta, Vetro"));
    }

    #[test]
    fn exception_replaces_the_weekday_entry_instead_of_merging() {
        let reference = date(2021, 6, 14);
        let exceptions = ExceptionOverrides::parse("15/06: Umido", "nessuno");
        let found =
            next_occurrence(reference, &sample_schedule(), &exceptions, 7, None).unwrap();

        assert_eq!(found.date, date(2021, 6, 15));
        assert_eq!(found.labels, parse_labels("Umido"));
    }

    #[test]
    fn exception_applies_every_year() {
        let schedule = sample_schedule();
        let exceptions = ExceptionOverrides::parse("15/06: Nessuno", "nessuno");
        for year in [2021, 2027, 2032] {
            let june_15 = date(year, 6, 15);
            assert!(labels_for_date(june_15, &schedule, &exceptions).is_empty());
        }
    }

    #[test]
    fn occurrences_never_exceed_the_lookahead_window() {
        let reference = date(2021, 6, 14);
        for lookahead in [0_u32, 1, 7, 30] {
            let all = resolve(
                reference,
                &sample_schedule(),
                &ExceptionOverrides::default(),
                lookahead,
                None,
            );
            assert!(all.iter().all(|occurrence| occurrence.days_until < lookahead));
        }
    }

    #[test]
    fn empty_schedule_resolves_to_nothing_scheduled() {
        let reference = date(2021, 6, 14);
        let schedule = WeeklySchedule::new();
        let exceptions = ExceptionOverrides::default();

        assert!(resolve(reference, &schedule, &exceptions, 30, None).is_empty());
        assert!(next_occurrence(reference, &schedule, &exceptions, 30, None).is_none());
    }

    #[test]
    fn enumeration_head_agrees_with_next_occurrence() {
        let reference = date(2021, 6, 14);
        let schedule = sample_schedule();
        let exceptions = ExceptionOverrides::parse("17/06: Nessuno\n19/06: Secco", "nessuno");

        for filter in [None, Some("plastica"), Some("Secco"), Some("vetro")] {
            let all = resolve(reference, &schedule, &exceptions, 30, filter);
            let first = next_occurrence(reference, &schedule, &exceptions, 30, filter);
            assert_eq!(all.first().cloned(), first);
        }
    }

    #[test]
    fn filter_matches_case_insensitively_within_the_split_list() {
        let reference = date(2021, 6, 14);
        let found = next_occurrence(
            reference,
            &sample_schedule(),
            &ExceptionOverrides::default(),
            7,
            Some("vetro"),
        )
        .unwrap();

        // "vetro" matches the Thursday "Carta, Vetro" entry.
        assert_eq!(found.date, date(2021, 6, 17));
    }

    #[test]
    fn filter_requires_an_exact_trimmed_match() {
        let reference = date(2021, 6, 14);
        let found = next_occurrence(
            reference,
            &sample_schedule(),
            &ExceptionOverrides::default(),
            30,
            Some("vet"),
        );
        assert!(found.is_none());
    }

    #[test]
    fn filtered_enumeration_preserves_date_order() {
        let reference = date(2021, 6, 14);
        let all = resolve(
            reference,
            &sample_schedule(),
            &ExceptionOverrides::default(),
            30,
            Some("plastica"),
        );

        assert!(!all.is_empty());
        assert!(
            all.windows(2)
                .all(|pair| pair[0].days_until < pair[1].days_until)
        );
        assert!(
            all.iter()
                .all(|occurrence| occurrence.labels.iter().any(|label| label.matches("plastica")))
        );
    }

    #[test]
    fn upcoming_caps_the_enumeration() {
        let reference = date(2021, 6, 14);
        let limited = upcoming(
            reference,
            &sample_schedule(),
            &ExceptionOverrides::default(),
            30,
            5,
        );
        assert_eq!(limited.len(), 5);
        assert_eq!(limited.first().map(|occurrence| occurrence.days_until), Some(1));
    }
}
