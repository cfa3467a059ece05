use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use ritiro_core::{context::InstanceContext, model::DateRange};
use ritiro_entities::{
    calendar::{CalendarEvent, events_between},
    sensor::{NextPickupSnapshot, TypeSnapshot, next_pickup_snapshot, type_snapshots},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    Types,
    Calendar,
}

pub(crate) struct App {
    pub context: Arc<InstanceContext>,

    pub screen: Screen,
    pub today: NaiveDate,
    pub next: NextPickupSnapshot,
    pub types: Vec<TypeSnapshot>,
    pub events: Vec<CalendarEvent>,
    pub icons: Vec<String>,

    pub status_message: Option<String>,
}

impl App {
    pub(crate) fn new(context: Arc<InstanceContext>, icons: Vec<String>) -> Self {
        let today = Local::now().date_naive();
        let config = context.config();
        let next = next_pickup_snapshot(config, today);
        let types = type_snapshots(config, today);
        let events = events_between(config, Self::calendar_range(today));

        Self {
            context,
            screen: Screen::Overview,
            today,
            next,
            types,
            events,
            icons,
            status_message: None,
        }
    }

    /// Recompute every snapshot against the current date.
    pub(crate) fn refresh(&mut self) {
        self.today = Local::now().date_naive();
        let config = self.context.config();
        self.next = next_pickup_snapshot(config, self.today);
        self.types = type_snapshots(config, self.today);
        self.events = events_between(config, Self::calendar_range(self.today));
    }

    pub(crate) fn calendar_range(today: NaiveDate) -> DateRange {
        DateRange {
            start: today,
            end: today + Duration::days(60),
        }
    }

    pub(crate) fn next_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Overview => Screen::Types,
            Screen::Types => Screen::Calendar,
            Screen::Calendar => Screen::Overview,
        };
    }

    pub(crate) fn previous_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Overview => Screen::Calendar,
            Screen::Types => Screen::Overview,
            Screen::Calendar => Screen::Types,
        };
    }
}
