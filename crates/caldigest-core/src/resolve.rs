//! Event time resolution.
//!
//! An event's displayed time has three independent sources of truth: a
//! time annotation embedded in the title, the all-day flag, and the start
//! timestamp. [`resolve_event`] reconciles them with a strict precedence
//! so exactly one source wins for every event.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::event::{CalendarEvent, ResolvedEvent};
use crate::markup;
use crate::time::TimeCode;
use crate::title_time;

/// Returns the UTC instant of civil midnight for `date` in `tz`.
///
/// Events starting before this instant are treated as continuing into
/// the day rather than starting on it.
pub fn day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&date.and_hms_opt(0, 0, 0).expect("valid midnight"))
        .earliest()
        .expect("civil midnight exists")
        .with_timezone(&Utc)
}

/// Resolves one event against the day beginning at `day_start`.
///
/// Precedence, highest first:
/// 1. a title time annotation, which overrides the calendar's own
///    timing metadata, all-day flag included;
/// 2. a start before `day_start`, meaning the event is carried over
///    from an earlier day;
/// 3. the all-day flag;
/// 4. the start timestamp converted into the civil timezone. The
///    conversion goes through `tz` rather than fixed-offset arithmetic
///    because daylight-saving transitions move the wall clock.
///
/// Exactly one branch applies; there is no fallthrough. The description
/// is converted to chat markup here so downstream stages only ever see
/// display-ready text.
pub fn resolve_event(event: &CalendarEvent, day_start: DateTime<Utc>, tz: Tz) -> ResolvedEvent {
    let description = markup::convert(&event.description_html);

    let (title, time) = match title_time::extract(&event.title) {
        Some(annotation) => (annotation.title, TimeCode::Minutes(annotation.minute_of_day)),
        None if event.start < day_start => (event.title.clone(), TimeCode::Continued),
        None if event.is_all_day => (event.title.clone(), TimeCode::AllDay),
        None => {
            let local = event.start.with_timezone(&tz);
            let minute_of_day = local.hour() * 60 + local.minute();
            (event.title.clone(), TimeCode::Minutes(minute_of_day))
        }
    };

    ResolvedEvent {
        title,
        time,
        description,
        color: event.color,
    }
}

/// Resolves a batch of events for one day.
pub fn resolve_events(
    events: &[CalendarEvent],
    day_start: DateTime<Utc>,
    tz: Tz,
) -> Vec<ResolvedEvent> {
    events
        .iter()
        .map(|event| resolve_event(event, day_start, tz))
        .collect()
}
