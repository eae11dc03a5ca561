//! Google Calendar API v3 source.

mod client;
mod source;

pub use client::GoogleCalendarClient;
pub use source::GoogleCalendarSource;
