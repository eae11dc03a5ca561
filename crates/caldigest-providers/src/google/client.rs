//! Google Calendar API client.
//!
//! A low-level HTTP client for the two Calendar API calls the digest
//! needs: listing a calendar's events for a time window and reading the
//! calendar's display color from the user's calendar list.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{SourceError, SourceResult};
use crate::raw_event::{RawEvent, RawEventTime};

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Upper bound on event-list pages fetched per calendar. A day of events
/// never comes close; the cap stops a misbehaving server from keeping the
/// pagination loop alive forever.
const MAX_EVENT_PAGES: usize = 32;

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GoogleCalendarClient {
    /// Creates a client with the given OAuth access token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            base_url: CALENDAR_API_BASE.to_string(),
            access_token: access_token.into(),
        }
    }

    /// Overrides the API base URL (tests point this at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Reads the calendar's display color from the user's calendar list.
    ///
    /// Returns `None` when the entry has no color set.
    ///
    /// # Errors
    ///
    /// `CalendarNotFound` when the calendar is not in the user's list;
    /// the standard transport/service mappings otherwise.
    pub async fn calendar_color(&self, calendar_id: &str) -> SourceResult<Option<String>> {
        let url = format!(
            "{}/users/me/calendarList/{}",
            self.base_url,
            urlencoding::encode(calendar_id)
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::CalendarNotFound(calendar_id.to_string()));
        }

        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let entry: CalendarListEntry = serde_json::from_str(&body)
            .map_err(|e| SourceError::InvalidResponse(format!("calendar list entry: {e}")))?;
        Ok(entry.background_color)
    }

    /// Lists a calendar's events overlapping `[time_min, time_max)`.
    ///
    /// Recurring events are expanded into instances and pages are fetched
    /// until the service stops returning a `nextPageToken`.
    pub async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> SourceResult<Vec<RawEvent>> {
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_EVENT_PAGES {
            let page = self
                .list_events_page(calendar_id, time_min, time_max, page_token.as_deref())
                .await?;

            events.extend(page.items.into_iter().filter_map(convert_event));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => {
                    page_token = None;
                    break;
                }
            }
        }

        if let Some(token) = page_token {
            warn!(calendar = %calendar_id, %token, "stopping event pagination at page cap");
        }

        debug!(calendar = %calendar_id, count = events.len(), "fetched events");
        Ok(events)
    }

    async fn list_events_page(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
        page_token: Option<&str>,
    ) -> SourceResult<EventListResponse> {
        let url = format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(calendar_id)
        );

        let mut request = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", time_min.to_rfc3339()),
                ("timeMax", time_max.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::CalendarNotFound(calendar_id.to_string()));
        }

        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| SourceError::InvalidResponse(format!("event list: {e}")))
    }
}

/// Maps a reqwest transport failure into the source taxonomy.
fn transport_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Network("request timeout".to_string())
    } else if err.is_connect() {
        SourceError::Network(format!("connection failed: {err}"))
    } else {
        SourceError::Network(format!("request failed: {err}"))
    }
}

/// Maps a non-success HTTP status into the source taxonomy.
fn status_error(status: reqwest::StatusCode, body: &str) -> SourceError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED => {
            SourceError::Authentication("access token expired or invalid".to_string())
        }
        reqwest::StatusCode::FORBIDDEN => {
            SourceError::Authorization("access denied to calendar".to_string())
        }
        reqwest::StatusCode::TOO_MANY_REQUESTS => {
            SourceError::RateLimited("rate limit exceeded".to_string())
        }
        _ => SourceError::Server(format!("API error ({status}): {body}")),
    }
}

/// Converts an API event into a [`RawEvent`].
///
/// Events without a usable start time are skipped.
fn convert_event(event: ApiEvent) -> Option<RawEvent> {
    let start = match event.start {
        Some(ApiEventTime {
            date_time: Some(instant),
            ..
        }) => RawEventTime::DateTime(instant),
        Some(ApiEventTime {
            date: Some(date), ..
        }) => RawEventTime::Date(date),
        _ => {
            debug!(summary = ?event.summary, "skipping event without start time");
            return None;
        }
    };

    let mut raw = RawEvent::new(start);
    raw.summary = event.summary;
    raw.description = event.description;
    raw.status = event.status;
    Some(raw)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    summary: Option<String>,
    description: Option<String>,
    status: Option<String>,
    start: Option<ApiEventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventTime {
    date_time: Option<DateTime<Utc>>,
    date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarListEntry {
    background_color: Option<String>,
}
