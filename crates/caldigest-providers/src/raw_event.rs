//! Raw event data as it comes from a calendar source.
//!
//! [`RawEvent`] preserves the provider's view of an event before
//! normalization into the core [`CalendarEvent`](caldigest_core::CalendarEvent)
//! shape. Only the fields the digest needs are carried.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The start time of a raw event.
///
/// Calendar services report either a concrete instant or, for all-day
/// entries, a bare date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RawEventTime {
    /// A specific instant, stored in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day event date.
    Date(NaiveDate),
}

impl RawEventTime {
    /// Returns `true` for a date-only (all-day) start.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

/// A raw calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// The event title, if the organizer set one.
    pub summary: Option<String>,

    /// The event description; may contain the restricted HTML subset.
    pub description: Option<String>,

    /// When the event starts.
    pub start: RawEventTime,

    /// The event status (e.g. "confirmed", "cancelled").
    pub status: Option<String>,

    /// The owning calendar's display color as a hex string, with or
    /// without a leading `#`.
    pub color_hex: Option<String>,
}

impl RawEvent {
    /// Creates a raw event with only a start time.
    pub fn new(start: RawEventTime) -> Self {
        Self {
            summary: None,
            description: None,
            start,
            status: None,
            color_hex: None,
        }
    }

    /// Returns the title, falling back to "(No title)" when absent or blank.
    pub fn effective_title(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("(No title)")
    }

    /// Returns `true` if the event has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("cancelled"))
    }

    /// Returns `true` for an all-day event.
    pub fn is_all_day(&self) -> bool {
        self.start.is_all_day()
    }

    /// Builder method to set the title.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Builder method to set the calendar color.
    pub fn with_color_hex(mut self, color: impl Into<String>) -> Self {
        self.color_hex = Some(color.into());
        self
    }
}
