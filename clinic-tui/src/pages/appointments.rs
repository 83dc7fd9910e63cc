//! Appointments page: the calendar engine over the event store.

use std::time::Duration;

use chrono::NaiveDate;
use clinic_lib::error::StoreError;
use clinic_lib::model::{self, appointment_calendar, category_color};
use clinic_lib::{Applied, EventStore, mock};
use trellis::calendar::{
    Calendar, CalendarCommand, CalendarEvent, CalendarIntent, CalendarState, CalendarView,
};

use crate::render::{Line, Span, Tone, calendar_lines, hex_tone, range_title};
use crate::settings::DashboardSettings;

pub struct AppointmentsPage {
    calendar: Calendar,
    state: CalendarState,
    store: EventStore,
    submit_delay: Duration,
    /// Patient whose visit the next slot click books.
    booking: Option<String>,
}

impl AppointmentsPage {
    pub fn new(settings: &DashboardSettings, today: NaiveDate) -> Self {
        let calendar = configured(settings);
        Self {
            state: calendar.initial_state(today),
            calendar,
            store: EventStore::new(model::categories(), model::tags())
                .with_events(mock::appointments(today)),
            submit_delay: Duration::from_millis(settings.submit_delay_ms),
            booking: None,
        }
    }

    /// Apply changed settings, keeping the current view and date.
    pub fn configure(&mut self, settings: &DashboardSettings) {
        self.calendar = configured(settings);
        self.state.week_start = settings.week_start;
        self.submit_delay = Duration::from_millis(settings.submit_delay_ms);
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn events(&self) -> &[CalendarEvent] {
        self.store.events()
    }

    pub fn book(&mut self, patient: String) {
        self.booking = Some(patient);
    }

    /// Run an engine command and submit any resulting intents.
    pub async fn run(&mut self, command: CalendarCommand) -> Result<Vec<Applied>, StoreError> {
        let (state, mut intents) = self.calendar.update(&self.state, self.store.events(), command);
        self.state = state;

        if let Some(patient) = self.booking.take() {
            match intents.iter_mut().find_map(|intent| match intent {
                CalendarIntent::Create(draft) => Some(draft),
                _ => None,
            }) {
                Some(draft) => draft.title = patient,
                None => self.booking = Some(patient),
            }
        }

        if intents.is_empty() {
            return Ok(Vec::new());
        }
        self.submit(intents).await
    }

    /// Apply intents to the store after the simulated submit delay.
    ///
    /// Stops at the first rejected intent; earlier ones stay applied.
    pub async fn submit(&mut self, intents: Vec<CalendarIntent>) -> Result<Vec<Applied>, StoreError> {
        if !self.submit_delay.is_zero() {
            log::debug!("submitting {} change(s) after {:?}", intents.len(), self.submit_delay);
            tokio::time::sleep(self.submit_delay).await;
        }

        let mut applied = Vec::with_capacity(intents.len());
        for intent in intents {
            applied.push(self.store.apply(intent)?);
        }
        Ok(applied)
    }

    pub fn lines(&self) -> Vec<Line> {
        let range = self.state.visible_range();
        let mut title = vec![
            Span::new("Appointments", Tone::Normal).bold(),
            Span::new(
                format!("  {} · {}", self.state.view, range_title(range.start, range.end)),
                Tone::Muted,
            ),
        ];
        if let Some(patient) = &self.booking {
            title.push(Span::new(format!("  booking: {}", patient), Tone::Accent));
        }

        let legend = self
            .calendar
            .categories()
            .iter()
            .map(|category| {
                if self.state.hidden_categories.contains(category) {
                    Span::new(format!("[ ] {}  ", category), Tone::Muted)
                } else {
                    Span::new(format!("[■] {}  ", category), hex_tone(category_color(category)))
                }
            })
            .collect();

        let mut lines = vec![Line::new(title), Line::new(legend)];
        let frame = self.calendar.render(&self.state, self.store.events());
        lines.extend(calendar_lines(&frame, self.store.events(), self.calendar.grid_scale()));

        if self.state.view != CalendarView::Month {
            let shown = self
                .store
                .events()
                .iter()
                .filter(|event| self.state.is_visible(event))
                .count();
            lines.push(Line::text(format!("{} appointments in view", shown), Tone::Muted));
        }
        lines
    }
}

fn configured(settings: &DashboardSettings) -> Calendar {
    appointment_calendar()
        .default_view(settings.default_view)
        .week_start(settings.week_start)
        .snap_minutes(settings.snap_minutes)
}
