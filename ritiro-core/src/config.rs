//! Instance configuration as persisted by the host platform.
//!
//! The raw form mirrors what the host's options form collects: free-text
//! label lists per weekday, a multi-line exceptions block, notification
//! settings, and display metadata. Schedule and override maps are derived
//! fresh on every call; the configuration is small and mutates rarely, so
//! recomputation beats the correctness risk of a stale cache.

use std::collections::HashMap;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{EntityId, ExceptionOverrides, WasteLabel, WeeklySchedule, parse_labels};

/// Sentinel value marking an exception date as having no pickup.
pub const DEFAULT_NO_PICKUP_SENTINEL: &str = "nessuno";

/// Format accepted for the notification time.
const NOTIFY_TIME_FORMAT: &str = "%H:%M";

/// Errors raised while interpreting raw configuration values.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The notification time is not a valid `HH:MM` string.
    #[error("invalid notification time {value:?}, expected HH:MM")]
    InvalidNotifyTime {
        /// The rejected raw value.
        value: String,
    },
}

/// Raw per-instance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Comma-separated labels collected on Mondays.
    pub monday: String,
    /// Comma-separated labels collected on Tuesdays.
    pub tuesday: String,
    /// Comma-separated labels collected on Wednesdays.
    pub wednesday: String,
    /// Comma-separated labels collected on Thursdays.
    pub thursday: String,
    /// Comma-separated labels collected on Fridays.
    pub friday: String,
    /// Comma-separated labels collected on Saturdays.
    pub saturday: String,
    /// Comma-separated labels collected on Sundays.
    pub sunday: String,

    /// Start of the collection time window, echoed to entity attributes.
    pub collection_start: String,
    /// End of the collection time window, echoed to entity attributes.
    pub collection_end: String,

    /// Target of the reminder notification (for example `notify.mobile_app`).
    pub notify_service: Option<String>,
    /// Daily reminder time as `HH:MM`.
    pub notify_time: Option<String>,
    /// Entities to turn on alongside the reminder. A scalar is accepted and
    /// treated as a one-element list.
    #[serde(deserialize_with = "one_or_many")]
    pub action_entities: Vec<EntityId>,

    /// Free-text overrides, one `DD/MM: value` line each.
    pub exceptions: String,
    /// Value marking an exception date as pickup-free.
    pub no_pickup_sentinel: String,

    /// Per-label icon file names (display metadata only).
    pub waste_icons: HashMap<String, String>,
    /// Per-label color values (display metadata only).
    pub waste_colors: HashMap<String, String>,
    /// Directory of icon images offered for display selection.
    pub icon_dir: Option<String>,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            monday: String::new(),
            tuesday: String::new(),
            wednesday: String::new(),
            thursday: String::new(),
            friday: String::new(),
            saturday: String::new(),
            sunday: String::new(),
            collection_start: String::new(),
            collection_end: String::new(),
            notify_service: None,
            notify_time: None,
            action_entities: Vec::new(),
            exceptions: String::new(),
            no_pickup_sentinel: DEFAULT_NO_PICKUP_SENTINEL.to_owned(),
            waste_icons: HashMap::new(),
            waste_colors: HashMap::new(),
            icon_dir: None,
        }
    }
}

impl InstanceConfig {
    /// Derive the weekly recurrence map from the raw weekday strings.
    #[must_use]
    pub fn weekly_schedule(&self) -> WeeklySchedule {
        let mut schedule = WeeklySchedule::new();
        for (weekday, raw) in self.weekday_fields() {
            schedule.set(weekday, parse_labels(raw));
        }
        schedule
    }

    /// Derive the date-keyed overrides from the exceptions block.
    #[must_use]
    pub fn exception_overrides(&self) -> ExceptionOverrides {
        ExceptionOverrides::parse(&self.exceptions, &self.no_pickup_sentinel)
    }

    /// Parse the configured reminder time.
    ///
    /// Returns `Ok(None)` when reminders are not configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNotifyTime`] when the value is present
    /// but not a valid `HH:MM` string; the caller is expected to skip
    /// reminder scheduling in that case rather than abort.
    pub fn notify_time(&self) -> Result<Option<NaiveTime>, ConfigError> {
        let Some(raw) = self.notify_time.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveTime::parse_from_str(raw, NOTIFY_TIME_FORMAT)
            .map(Some)
            .map_err(|_parse_error| ConfigError::InvalidNotifyTime {
                value: raw.to_owned(),
            })
    }

    /// Distinct labels across the whole week, case-insensitively deduplicated
    /// (first spelling wins) and sorted for stable entity creation.
    #[must_use]
    pub fn unique_labels(&self) -> Vec<WasteLabel> {
        let mut labels: Vec<WasteLabel> = Vec::new();
        for (_weekday, raw) in self.weekday_fields() {
            for label in parse_labels(raw) {
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
        }
        labels.sort_by_key(|label| label.as_str().to_lowercase());
        labels
    }

    /// Configured color for a label, ignoring the "default" placeholder.
    #[must_use]
    pub fn color_for(&self, label: &WasteLabel) -> Option<&str> {
        self.waste_colors
            .get(label.as_str())
            .map(String::as_str)
            .filter(|color| !color.is_empty() && *color != "default")
    }

    fn weekday_fields(&self) -> [(Weekday, &str); 7] {
        [
            (Weekday::Mon, self.monday.as_str()),
            (Weekday::Tue, self.tuesday.as_str()),
            (Weekday::Wed, self.wednesday.as_str()),
            (Weekday::Thu, self.thursday.as_str()),
            (Weekday::Fri, self.friday.as_str()),
            (Weekday::Sat, self.saturday.as_str()),
            (Weekday::Sun, self.sunday.as_str()),
        ]
    }
}

/// Accept either a single entity id or a list of them.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(EntityId),
        Many(Vec<EntityId>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(entity) => vec![entity],
        OneOrMany::Many(entities) => entities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_schedule_is_derived_from_weekday_strings() {
        let config = InstanceConfig {
            tuesday: "Plastica".to_owned(),
            thursday: "Carta, Vetro".to_owned(),
            ..InstanceConfig::default()
        };
        let schedule = config.weekly_schedule();

        assert_eq!(schedule.for_weekday(Weekday::Tue).len(), 1);
        assert_eq!(schedule.for_weekday(Weekday::Thu).len(), 2);
        assert!(schedule.for_weekday(Weekday::Mon).is_empty());
    }

    #[test]
    fn notify_time_parses_hh_mm() {
        let config = InstanceConfig {
            notify_time: Some("20:00".to_owned()),
            ..InstanceConfig::default()
        };
        let parsed = config.notify_time().unwrap().unwrap();
        assert_eq!(parsed, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
    }

    #[test]
    fn malformed_notify_time_is_an_error_not_a_panic() {
        let config = InstanceConfig {
            notify_time: Some("late evening".to_owned()),
            ..InstanceConfig::default()
        };
        assert!(matches!(
            config.notify_time(),
            Err(ConfigError::InvalidNotifyTime { .. })
        ));
    }

    #[test]
    fn missing_notify_time_means_reminders_disabled() {
        let config = InstanceConfig::default();
        assert!(config.notify_time().unwrap().is_none());

        let blank = InstanceConfig {
            notify_time: Some("  ".to_owned()),
            ..InstanceConfig::default()
        };
        assert!(blank.notify_time().unwrap().is_none());
    }

    #[test]
    fn unique_labels_dedupe_case_insensitively_keeping_first_spelling() {
        let config = InstanceConfig {
            monday: "Carta".to_owned(),
            tuesday: "carta, Vetro".to_owned(),
            friday: "Plastica".to_owned(),
            ..InstanceConfig::default()
        };
        let labels: Vec<String> = config
            .unique_labels()
            .iter()
            .map(|label| label.as_str().to_owned())
            .collect();
        assert_eq!(labels, vec!["Carta", "Plastica", "Vetro"]);
    }

    #[test]
    fn action_entities_accept_scalar_or_list() {
        let scalar: InstanceConfig =
            serde_json::from_str(r#"{"action_entities": "switch.bins"}"#).unwrap();
        assert_eq!(scalar.action_entities, vec![EntityId("switch.bins".into())]);

        let list: InstanceConfig =
            serde_json::from_str(r#"{"action_entities": ["switch.a", "light.b"]}"#).unwrap();
        assert_eq!(list.action_entities.len(), 2);
    }

    #[test]
    fn sentinel_defaults_to_nessuno_when_absent() {
        let config: InstanceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.no_pickup_sentinel, DEFAULT_NO_PICKUP_SENTINEL);
    }

    #[test]
    fn color_for_skips_the_default_placeholder() {
        let mut config = InstanceConfig::default();
        config
            .waste_colors
            .insert("Carta".to_owned(), "#2196F3".to_owned());
        config
            .waste_colors
            .insert("Vetro".to_owned(), "default".to_owned());

        assert_eq!(config.color_for(&WasteLabel::new("Carta")), Some("#2196F3"));
        assert_eq!(config.color_for(&WasteLabel::new("Vetro")), None);
    }
}
