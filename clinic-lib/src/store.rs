//! Appointment store
//!
//! The calendar engine never touches events; it reports intents. The store
//! is the host-side owner of the event list that applies them.

use trellis::calendar::{CalendarEvent, CalendarIntent, EventDraft, EventId, EventPatch};
use uuid::Uuid;

use crate::error::{FieldValidationError, StoreError, ValidationError};
use crate::model::category_color;

/// What a successfully applied intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Created(EventId),
    Updated(EventId),
    Deleted(CalendarEvent),
}

/// Owner of the appointment list.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
    categories: Vec<String>,
    tags: Vec<String>,
}

impl EventStore {
    /// An empty store accepting the given categories and tags.
    ///
    /// An empty category or tag list accepts any value.
    pub fn new(categories: Vec<String>, tags: Vec<String>) -> Self {
        Self {
            events: Vec::new(),
            categories,
            tags,
        }
    }

    /// Seed the store. Invalid events and duplicate ids are skipped.
    pub fn with_events(mut self, events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        for event in events {
            if self.get(&event.id).is_some() {
                log::warn!("skipping duplicate appointment id {}", event.id);
            } else if let Err(e) = self.validate(&event) {
                log::warn!("skipping seeded appointment {}: {}", event.id, e);
            } else {
                self.events.push(event);
            }
        }
        self
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn get(&self, id: &EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| &event.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Apply one intent reported by the calendar engine.
    pub fn apply(&mut self, intent: CalendarIntent) -> Result<Applied, StoreError> {
        match intent {
            CalendarIntent::Create(draft) => self.create(draft).map(Applied::Created),
            CalendarIntent::Update { id, patch } => {
                self.update(&id, &patch)?;
                Ok(Applied::Updated(id))
            }
            CalendarIntent::Delete(id) => self.delete(&id).map(Applied::Deleted),
        }
    }

    /// Insert a new event with a fresh UUID.
    ///
    /// A draft without a color gets its category's color.
    pub fn create(&mut self, draft: EventDraft) -> Result<EventId, StoreError> {
        let id = EventId::new(Uuid::new_v4().to_string());
        let mut event = draft.into_event(id.clone());
        if event.color.is_empty() {
            event.color = category_color(&event.category).to_string();
        }
        self.validate(&event)?;

        log::info!("created appointment {} '{}' at {}", id, event.title, event.start);
        self.events.push(event);
        Ok(id)
    }

    /// Merge `patch` into an existing event.
    ///
    /// The patched event is validated as a whole; on error nothing changes.
    pub fn update(&mut self, id: &EventId, patch: &EventPatch) -> Result<(), StoreError> {
        let index = self.position(id)?;
        let mut event = self.events[index].clone();
        patch.apply_to(&mut event);
        if patch.category.is_some() && patch.color.is_none() {
            event.color = category_color(&event.category).to_string();
        }
        self.validate(&event)?;

        log::info!("updated appointment {}", id);
        self.events[index] = event;
        Ok(())
    }

    /// Remove an event, returning it.
    pub fn delete(&mut self, id: &EventId) -> Result<CalendarEvent, StoreError> {
        let index = self.position(id)?;
        log::info!("deleted appointment {}", id);
        Ok(self.events.remove(index))
    }

    /// Check an event against the store's rules.
    pub fn validate(&self, event: &CalendarEvent) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if event.title.trim().is_empty() {
            errors.push(FieldValidationError::new("title", "is required"));
        }
        if !event.is_valid() {
            errors.push(FieldValidationError::new("end", "must be after the start"));
        }
        if !self.categories.is_empty() && !self.categories.contains(&event.category) {
            errors.push(FieldValidationError::new(
                "category",
                format!("unknown category '{}'", event.category),
            ));
        }
        if !self.tags.is_empty() {
            for tag in event.tags.iter().filter(|tag| !self.tags.contains(tag)) {
                errors.push(FieldValidationError::new("tags", format!("unknown tag '{}'", tag)));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors })
        }
    }

    fn position(&self, id: &EventId) -> Result<usize, StoreError> {
        self.events
            .iter()
            .position(|event| &event.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}
