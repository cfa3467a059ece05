//! Domain data structures for weekly schedules, overrides, and resolved pickups.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Free-text waste label such as "Plastica" or "Carta".
///
/// The original spelling is preserved for display; comparisons and filter
/// matching are case-insensitive on the trimmed text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WasteLabel(String);

impl WasteLabel {
    /// Wrap a raw label, trimming surrounding whitespace.
    #[must_use]
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Self(raw.into().trim().to_owned())
    }

    /// The label text as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive exact match against another label text.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.trim().to_lowercase()
    }
}

impl PartialEq for WasteLabel {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Eq for WasteLabel {}

impl fmt::Display for WasteLabel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Split a comma-separated label list: trim fragments, drop empty ones,
/// preserve the original casing.
#[must_use]
pub fn parse_labels(raw: &str) -> Vec<WasteLabel> {
    raw.split(',')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(WasteLabel::new)
        .collect()
}

/// Join labels for display ("Carta, Vetro").
#[must_use]
pub fn join_labels(labels: &[WasteLabel]) -> String {
    labels
        .iter()
        .map(WasteLabel::as_str)
        .collect::<Vec<&str>>()
        .join(", ")
}

/// Weekly recurrence map: one ordered label list per weekday.
///
/// An empty list means no pickup on that weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: [Vec<WasteLabel>; 7],
}

impl WeeklySchedule {
    /// Build an empty schedule (no pickups anywhere).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the label list for a weekday.
    pub fn set(&mut self, weekday: Weekday, labels: Vec<WasteLabel>) {
        let index = weekday.num_days_from_monday() as usize;
        if let Some(slot) = self.days.get_mut(index) {
            *slot = labels;
        }
    }

    /// Labels collected on the given weekday; empty when nothing is due.
    #[must_use]
    pub fn for_weekday(&self, weekday: Weekday) -> &[WasteLabel] {
        let index = weekday.num_days_from_monday() as usize;
        self.days.get(index).map_or(&[], Vec::as_slice)
    }

    /// Whether no weekday carries a pickup at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }
}

/// Value of a date-keyed exception entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOverride {
    /// Suppress any weekday-derived pickup on the matching date.
    NoPickup,
    /// Replace the weekday-derived labels entirely (never merged).
    Pickup(Vec<WasteLabel>),
}

/// Date-keyed overrides of the weekly schedule.
///
/// Keys are `(day of month, month)` without a year component, so every entry
/// recurs annually. The last parsed line wins for duplicate keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionOverrides {
    map: HashMap<(u32, u32), DayOverride>,
}

impl ExceptionOverrides {
    /// Parse a free-text exceptions block, one `DD/MM: value` entry per line.
    ///
    /// A value equal to `no_pickup_sentinel` (case-insensitive) suppresses the
    /// pickup; anything else is a replacement label list. Lines that do not
    /// parse are silently dropped, the remaining lines are still honored.
    #[must_use]
    pub fn parse(text: &str, no_pickup_sentinel: &str) -> Self {
        let sentinel = no_pickup_sentinel.trim().to_lowercase();
        let mut map = HashMap::new();

        for line in text.lines() {
            let Some((date_part, value)) = line.split_once(':') else {
                continue;
            };
            let Some((day_raw, month_raw)) = date_part.trim().split_once('/') else {
                continue;
            };
            let (Ok(day), Ok(month)) = (
                day_raw.trim().parse::<u32>(),
                month_raw.trim().parse::<u32>(),
            ) else {
                continue;
            };

            let value = value.trim();
            let entry = if !sentinel.is_empty() && value.to_lowercase() == sentinel {
                DayOverride::NoPickup
            } else {
                DayOverride::Pickup(parse_labels(value))
            };

            // Insert order is line order, so a duplicate key deterministically
            // keeps the last entry.
            map.insert((day, month), entry);
        }

        Self { map }
    }

    /// Look up the override matching a calendar date, in any year.
    #[must_use]
    pub fn for_date(&self, date: NaiveDate) -> Option<&DayOverride> {
        self.map.get(&(date.day(), date.month()))
    }

    /// Whether no override is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// A resolved pickup within the lookahead window. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// Date of the pickup.
    pub date: NaiveDate,
    /// Ordered labels collected on that date.
    pub labels: Vec<WasteLabel>,
    /// Days between the reference date and `date`.
    pub days_until: u32,
}

/// Identifier of an entity owned by or acted upon through the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl fmt::Display for EntityId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Inclusive start/end range for calendar queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn labels_split_trim_and_drop_empty_fragments() {
        let labels = parse_labels(" Carta , Vetro ,, ");
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.first().map(WasteLabel::as_str), Some("Carta"));
        assert_eq!(labels.get(1).map(WasteLabel::as_str), Some("Vetro"));
    }

    #[test]
    fn label_matching_is_case_insensitive_but_display_preserves_case() {
        let label = WasteLabel::new("Plastica");
        assert!(label.matches("plastica"));
        assert!(label.matches(" PLASTICA "));
        assert!(!label.matches("plast"));
        assert_eq!(label.to_string(), "Plastica");
    }

    #[test]
    fn weekly_schedule_defaults_to_no_pickups() {
        let schedule = WeeklySchedule::new();
        assert!(schedule.is_empty());
        assert!(schedule.for_weekday(Weekday::Mon).is_empty());
    }

    #[test]
    fn weekly_schedule_set_and_lookup() {
        let mut schedule = WeeklySchedule::new();
        schedule.set(Weekday::Tue, parse_labels("Plastica"));
        assert_eq!(schedule.for_weekday(Weekday::Tue).len(), 1);
        assert!(schedule.for_weekday(Weekday::Wed).is_empty());
        assert!(!schedule.is_empty());
    }

    #[test]
    fn exceptions_parse_and_match_in_any_year() {
        let overrides = ExceptionOverrides::parse("15/06: Carta", "nessuno");
        assert!(overrides.for_date(date(2025, 6, 15)).is_some());
        assert!(overrides.for_date(date(2026, 6, 15)).is_some());
        assert!(overrides.for_date(date(2025, 6, 16)).is_none());
    }

    #[test]
    fn exception_sentinel_is_case_insensitive() {
        let overrides = ExceptionOverrides::parse("15/06: NESSUNO", "nessuno");
        assert_eq!(
            overrides.for_date(date(2027, 6, 15)),
            Some(&DayOverride::NoPickup)
        );
    }

    #[test]
    fn exception_sentinel_is_configurable() {
        let overrides = ExceptionOverrides::parse("01/01: skip", "skip");
        assert_eq!(
            overrides.for_date(date(2025, 1, 1)),
            Some(&DayOverride::NoPickup)
        );
    }

    #[test]
    fn malformed_exception_lines_are_dropped_silently() {
        let text = "not a date\n15/06: Carta\n32/cc: Vetro\n/: x\n";
        let overrides = ExceptionOverrides::parse(text, "nessuno");
        assert_eq!(
            overrides.for_date(date(2025, 6, 15)),
            Some(&DayOverride::Pickup(vec![WasteLabel::new("Carta")]))
        );
    }

    #[test]
    fn duplicate_exception_key_keeps_last_line() {
        let text = "15/06: Carta\n15/06: Vetro";
        let overrides = ExceptionOverrides::parse(text, "nessuno");
        assert_eq!(
            overrides.for_date(date(2025, 6, 15)),
            Some(&DayOverride::Pickup(vec![WasteLabel::new("Vetro")]))
        );
    }
}
