//! Calendar read backends for the digest run.
//!
//! This crate provides the narrow interface the run uses to read a day's
//! events, and the one production implementation:
//!
//! - [`CalendarSource`] - the read-only trait the run depends on
//! - [`RawEvent`] - provider data before normalization
//! - [`normalize_events`] - conversion into the core event shape
//! - [`SourceError`] - the error taxonomy (a missing calendar is
//!   non-fatal; the run skips it and continues)
//! - [`google::GoogleCalendarSource`] - Google Calendar API v3 backend

pub mod error;
pub mod google;
pub mod normalize;
pub mod raw_event;
pub mod source;

pub use error::{SourceError, SourceResult};
pub use normalize::{normalize_event, normalize_events, parse_color_hex};
pub use raw_event::{RawEvent, RawEventTime};
pub use source::{BoxFuture, CalendarSource};
