//! Appointment categories, tags and calendar setup

use chrono::{NaiveDateTime, TimeDelta};
use trellis::calendar::{Calendar, CalendarEvent, EventId, GridScale};

/// Appointment categories, in the order shown by the category filter.
pub const CATEGORIES: [&str; 4] = ["Consultation", "Follow-up", "Procedure", "Emergency"];

/// Tags an appointment can carry.
pub const TAGS: [&str; 4] = ["new-patient", "insurance", "urgent", "telehealth"];

/// First and last hour shown by the day and week grids.
pub const CLINIC_HOURS: (u32, u32) = (7, 20);

/// Display color of a category; unknown categories are grey.
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Consultation" => "#2563eb",
        "Follow-up" => "#16a34a",
        "Procedure" => "#9333ea",
        "Emergency" => "#dc2626",
        _ => "#6b7280",
    }
}

pub fn categories() -> Vec<String> {
    CATEGORIES.iter().map(|c| c.to_string()).collect()
}

pub fn tags() -> Vec<String> {
    TAGS.iter().map(|t| t.to_string()).collect()
}

/// Calendar definition for the appointments page.
///
/// The grid shows clinic hours at one row per minute; hosts override the
/// view, week start and snapping from their settings.
pub fn appointment_calendar() -> Calendar {
    let (open, close) = CLINIC_HOURS;
    Calendar::new(categories(), tags()).scale(GridScale::hours(open, close, 1.0))
}

/// Build an appointment lasting `minutes`, colored by its category.
pub fn appointment(
    id: impl Into<EventId>,
    title: impl Into<String>,
    start: NaiveDateTime,
    minutes: i64,
    category: &str,
) -> CalendarEvent {
    CalendarEvent::new(id, title, start, start + TimeDelta::minutes(minutes))
        .with_category(category)
        .with_color(category_color(category))
}
