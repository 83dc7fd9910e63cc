//! Calendar event types and the intents the engine reports to its host.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Shortest duration an event is drawn with.
///
/// Events whose end is not after their start are a host contract violation;
/// the layout clamps them to this length instead of failing.
pub const MIN_EVENT_MINUTES: i64 = 15;

/// Unique identifier of a calendar event, assigned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scheduled event (an appointment in the clinic dashboard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Display color name or hex string.
    pub color: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl CalendarEvent {
    /// Create an event with empty description, color and tags.
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            start,
            end,
            color: String::new(),
            category: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The calendar day this event is placed on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Returns `true` if `start < end`.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// The end used for layout: the real end, or `start + 15min` when the
    /// range is empty or inverted.
    pub fn effective_end(&self) -> NaiveDateTime {
        let min_end = self
            .start
            .checked_add_signed(TimeDelta::minutes(MIN_EVENT_MINUTES))
            .unwrap_or(NaiveDateTime::MAX);
        if self.end <= self.start {
            min_end
        } else {
            self.end
        }
    }

    /// Duration used for layout and dragging.
    pub fn effective_duration(&self) -> TimeDelta {
        self.effective_end() - self.start
    }

    /// Half-open `[start, end)` overlap test on effective ranges.
    pub fn overlaps(&self, other: &CalendarEvent) -> bool {
        self.start < other.effective_end() && other.start < self.effective_end()
    }
}

/// A new event as requested by the engine; the host assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start,
            end,
            color: String::new(),
            category: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Turn the draft into an event with a host-assigned id.
    pub fn into_event(self, id: EventId) -> CalendarEvent {
        CalendarEvent {
            id,
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            color: self.color,
            category: self.category,
            tags: self.tags,
        }
    }
}

/// A partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl EventPatch {
    /// A patch that only moves the event.
    pub fn reschedule(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this patch into `event`.
    pub fn apply_to(&self, event: &mut CalendarEvent) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(color) = &self.color {
            event.color = color.clone();
        }
        if let Some(category) = &self.category {
            event.category = category.clone();
        }
        if let Some(tags) = &self.tags {
            event.tags = tags.clone();
        }
    }
}

/// A mutation the engine asks its host to perform.
///
/// The engine never edits events itself; the host applies intents to its
/// own list and passes the result back on the next call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarIntent {
    Create(EventDraft),
    Update { id: EventId, patch: EventPatch },
    Delete(EventId),
}
