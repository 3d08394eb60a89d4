// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! The client's working copy of events and the views derived from it.
//!
//! Everything here is pure state manipulation with no I/O, so the whole
//! module is unit-testable without a server. Derived views are recomputed
//! on each call; the data volumes involved make caching pointless.

use chrono::{DateTime, Duration, Utc};
use common::{CreateEventPayload, Event, colors};
use std::collections::HashMap;

pub use common::UPCOMING_WINDOW_DAYS;

/// The sidebar shows at most this many upcoming events.
pub const UPCOMING_LIMIT: usize = 5;

/// The user's current interaction context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    /// Creating a new event, pre-seeded with the clicked time range.
    Creating {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Editing the existing event with this ID.
    Editing { id: i64 },
}

/// What the modal form submits. Unlike [`CreateEventPayload`] every required
/// field is concrete here: the form cannot be submitted half-filled.
#[derive(Debug, Clone)]
pub struct EventForm {
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub all_day: bool,
    pub recurrence_rule: Option<String>,
}

impl EventForm {
    /// Assembles the wire payload, deriving the color from the category with
    /// the same lookup the server uses. This lets the UI render the event
    /// optimistically before the server confirms.
    pub fn into_payload(self) -> CreateEventPayload {
        let color = colors::color_for_category(&self.event_type).to_string();
        CreateEventPayload {
            title: Some(self.title),
            description: self.description,
            event_type: Some(self.event_type),
            start_time: Some(self.start_time),
            end_time: Some(self.end_time),
            all_day: Some(self.all_day),
            color: Some(color),
            recurrence_rule: self.recurrence_rule,
        }
    }
}

/// Local calendar state: the full known event set, per-category visibility
/// flags, and the active selection.
#[derive(Debug)]
pub struct CalendarViewModel {
    events: Vec<Event>,
    filters: HashMap<String, bool>,
    selection: Selection,
}

impl CalendarViewModel {
    /// Starts empty, with every known category visible.
    pub fn new() -> Self {
        let filters = colors::CATEGORIES
            .iter()
            .map(|c| (c.to_string(), true))
            .collect();
        Self {
            events: Vec::new(),
            filters,
            selection: Selection::None,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Replaces the full known set, typically after a fetch.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn find_event(&self, id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Removes an event from the local set. Server-confirmed deletions only;
    /// there is no optimistic removal.
    pub fn remove_event(&mut self, id: i64) {
        self.events.retain(|e| e.id != id);
    }

    /// A category with no recorded flag is visible.
    pub fn is_visible(&self, category: &str) -> bool {
        self.filters.get(category).copied().unwrap_or(true)
    }

    pub fn set_filter(&mut self, category: &str, visible: bool) {
        self.filters.insert(category.to_string(), visible);
    }

    pub fn toggle_filter(&mut self, category: &str) {
        let visible = self.is_visible(category);
        self.filters.insert(category.to_string(), !visible);
    }

    /// Events belonging to a visible category.
    pub fn filtered_events(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| self.is_visible(&e.event_type))
            .collect()
    }

    /// Events starting within `[now, now + 3 days]`, both bounds inclusive,
    /// ascending by start time, at most [`UPCOMING_LIMIT`] entries. Local
    /// counterpart of the server's upcoming query, used as a fallback.
    pub fn upcoming_events(&self, now: DateTime<Utc>) -> Vec<&Event> {
        let window_end = now + Duration::days(UPCOMING_WINDOW_DAYS);

        let mut upcoming: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.start_time >= now && e.start_time <= window_end)
            .collect();
        upcoming.sort_by_key(|e| e.start_time);
        upcoming.truncate(UPCOMING_LIMIT);
        upcoming
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The user clicked an empty slot: start creating a new event there.
    pub fn select_slot(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        self.selection = Selection::Creating { start, end };
    }

    /// The user clicked an existing event: start editing it.
    pub fn select_event(&mut self, id: i64) {
        self.selection = Selection::Editing { id };
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }
}
