//! CalendarSource trait definition.
//!
//! [`CalendarSource`] is the narrow interface the digest run uses to read
//! a day's events. Implementations own their transport and credentials;
//! the run only sees raw events or a [`SourceError`].

use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::error::SourceResult;
use crate::raw_event::RawEvent;

/// A boxed future for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A read-only view of a set of calendars.
///
/// Implementations must return every event that overlaps the civil day
/// `date` in `tz`, including events that started on an earlier day;
/// those are what the digest renders as "continued".
pub trait CalendarSource: Send + Sync {
    /// A short name for the backing service, used in logs.
    fn name(&self) -> &str;

    /// Fetches the raw events of one calendar for one civil day.
    ///
    /// # Errors
    ///
    /// [`SourceError::CalendarNotFound`](crate::SourceError::CalendarNotFound)
    /// when the calendar id is unknown; other variants for transport and
    /// service failures. Either way the caller decides whether to skip
    /// or abort; this trait does not retry.
    fn events_for_day(
        &self,
        calendar_id: &str,
        date: NaiveDate,
        tz: Tz,
    ) -> BoxFuture<'_, SourceResult<Vec<RawEvent>>>;
}
