//! RawEvent to CalendarEvent conversion.
//!
//! Normalization is where provider quirks stop: cancelled events are
//! dropped, the title fallback is applied, all-day dates become civil
//! midnight in the digest timezone, and the calendar color is parsed into
//! a packed RGB value.

use chrono_tz::Tz;
use tracing::debug;

use caldigest_core::{CalendarEvent, day_start};

use crate::raw_event::{RawEvent, RawEventTime};

/// Converts one raw event into the core event shape.
///
/// All-day dates are anchored to civil midnight in `tz` so downstream
/// comparisons against the day boundary behave: midnight UTC on the same
/// date would land on the previous civil day for western timezones.
pub fn normalize_event(raw: &RawEvent, tz: Tz) -> CalendarEvent {
    let start = match raw.start {
        RawEventTime::DateTime(instant) => instant,
        RawEventTime::Date(date) => day_start(date, tz),
    };

    let color = raw
        .color_hex
        .as_deref()
        .and_then(parse_color_hex)
        .unwrap_or(0);

    CalendarEvent::new(raw.effective_title(), start)
        .with_description(raw.description.clone().unwrap_or_default())
        .with_all_day(raw.is_all_day())
        .with_color(color)
}

/// Converts a batch of raw events, dropping cancelled ones.
pub fn normalize_events(raw_events: &[RawEvent], tz: Tz) -> Vec<CalendarEvent> {
    raw_events
        .iter()
        .filter(|raw| !raw.is_cancelled())
        .map(|raw| normalize_event(raw, tz))
        .collect()
}

/// Parses a `#rrggbb` or `rrggbb` color into a packed RGB value.
///
/// Returns `None` on anything that is not valid hex; the caller falls
/// back to black rather than failing the event.
pub fn parse_color_hex(hex: &str) -> Option<u32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    match u32::from_str_radix(digits, 16) {
        Ok(value) => Some(value & 0xFF_FFFF),
        Err(_) => {
            debug!(color = %hex, "unparseable calendar color");
            None
        }
    }
}
