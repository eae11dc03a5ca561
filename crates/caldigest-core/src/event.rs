//! Event types for the digest pipeline.
//!
//! - [`CalendarEvent`]: a normalized event as read from a calendar,
//!   the input to time resolution
//! - [`ResolvedEvent`]: an event with its display time settled and its
//!   description converted to chat markup

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::TimeCode;

/// A normalized calendar event.
///
/// Produced by a calendar source from its provider-specific raw data;
/// everything downstream of normalization works on this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The event title as the organizer wrote it (may embed a time
    /// annotation; resolution strips it).
    pub title: String,
    /// The event description in the restricted HTML subset. Empty when
    /// the event has no description.
    pub description_html: String,
    /// When the event starts, in UTC. For all-day events this is civil
    /// midnight of the event's day in the digest timezone.
    pub start: DateTime<Utc>,
    /// Whether this is an all-day entry.
    pub is_all_day: bool,
    /// The owning calendar's color as a packed RGB value (0..=0xFFFFFF).
    pub color: u32,
}

impl CalendarEvent {
    /// Creates an event with the required fields; description empty,
    /// not all-day, color black.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description_html: String::new(),
            start,
            is_all_day: false,
            color: 0,
        }
    }

    /// Builder method to set the HTML description.
    pub fn with_description(mut self, html: impl Into<String>) -> Self {
        self.description_html = html.into();
        self
    }

    /// Builder method to mark the event all-day.
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.is_all_day = all_day;
        self
    }

    /// Builder method to set the calendar color.
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }
}

/// An event ready for formatting and packing.
///
/// The time code is always resolved through exactly one of the resolution
/// branches; it is never left undefined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEvent {
    /// Display title, stripped of any embedded time annotation.
    pub title: String,
    /// The resolved, sortable time code.
    pub time: TimeCode,
    /// Description in chat markup. Empty when the event has none.
    pub description: String,
    /// The owning calendar's color as a packed RGB value.
    pub color: u32,
}
