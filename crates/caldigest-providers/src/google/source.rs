//! CalendarSource implementation backed by the Google Calendar API.

use chrono::NaiveDate;
use chrono_tz::Tz;

use caldigest_core::day_start;

use crate::error::SourceResult;
use crate::google::client::GoogleCalendarClient;
use crate::raw_event::RawEvent;
use crate::source::{BoxFuture, CalendarSource};

/// A [`CalendarSource`] reading from the Google Calendar API.
///
/// The calendar's display color applies to every event it contains, so it
/// is fetched once per calendar and stamped onto each raw event.
#[derive(Debug)]
pub struct GoogleCalendarSource {
    client: GoogleCalendarClient,
}

impl GoogleCalendarSource {
    /// Wraps an API client as a calendar source.
    pub fn new(client: GoogleCalendarClient) -> Self {
        Self { client }
    }
}

impl CalendarSource for GoogleCalendarSource {
    fn name(&self) -> &str {
        "google"
    }

    fn events_for_day(
        &self,
        calendar_id: &str,
        date: NaiveDate,
        tz: Tz,
    ) -> BoxFuture<'_, SourceResult<Vec<RawEvent>>> {
        let calendar_id = calendar_id.to_string();
        Box::pin(async move {
            let time_min = day_start(date, tz);
            let time_max = day_start(date.succ_opt().expect("valid successor date"), tz);

            let color = self.client.calendar_color(&calendar_id).await?;
            let mut events = self
                .client
                .list_events(&calendar_id, time_min, time_max)
                .await?;

            if let Some(color) = color {
                for event in &mut events {
                    event.color_hex = Some(color.clone());
                }
            }

            Ok(events)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::raw_event::RawEventTime;
    use chrono_tz::America::Chicago;
    use std::time::Duration;

    fn source_for(server: &mockito::ServerGuard) -> GoogleCalendarSource {
        let client = GoogleCalendarClient::new("test-token", Duration::from_secs(5))
            .with_base_url(server.url());
        GoogleCalendarSource::new(client)
    }

    fn digest_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn color_mock(server: &mut mockito::ServerGuard) -> mockito::Mock {
        server
            .mock("GET", "/users/me/calendarList/team")
            .with_status(200)
            .with_body(r##"{"backgroundColor": "#2f9e44"}"##)
            .create()
    }

    #[tokio::test]
    async fn fetches_and_stamps_calendar_color() {
        let mut server = mockito::Server::new_async().await;
        let _color = color_mock(&mut server);
        let _events = server
            .mock("GET", "/calendars/team/events")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{
                    "items": [
                        {
                            "summary": "Raid Night",
                            "description": "<b>bring</b> food",
                            "status": "confirmed",
                            "start": {"dateTime": "2026-08-08T01:00:00Z"}
                        },
                        {
                            "summary": "Festival",
                            "start": {"date": "2026-08-07"}
                        }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let source = source_for(&server);
        let events = source
            .events_for_day("team", digest_date(), Chicago)
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary.as_deref(), Some("Raid Night"));
        assert_eq!(events[0].color_hex.as_deref(), Some("#2f9e44"));
        assert!(matches!(events[1].start, RawEventTime::Date(_)));
        assert_eq!(events[1].color_hex.as_deref(), Some("#2f9e44"));
    }

    #[tokio::test]
    async fn paginates_until_token_runs_out() {
        let mut server = mockito::Server::new_async().await;
        let _color = color_mock(&mut server);
        // Mocks match newest-first: the pageToken mock below shadows this
        // general one for the second request only.
        let _first = server
            .mock("GET", "/calendars/team/events")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{
                    "items": [{"summary": "One", "start": {"dateTime": "2026-08-07T18:00:00Z"}}],
                    "nextPageToken": "page-2"
                }"#,
            )
            .create_async()
            .await;
        let _second = server
            .mock("GET", "/calendars/team/events")
            .match_query(mockito::Matcher::Regex("pageToken=page-2".to_string()))
            .with_status(200)
            .with_body(
                r#"{"items": [{"summary": "Two", "start": {"dateTime": "2026-08-07T20:00:00Z"}}]}"#,
            )
            .create_async()
            .await;

        let source = source_for(&server);
        let events = source
            .events_for_day("team", digest_date(), Chicago)
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary.as_deref(), Some("One"));
        assert_eq!(events[1].summary.as_deref(), Some("Two"));
    }

    #[tokio::test]
    async fn missing_calendar_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", "/users/me/calendarList/ghost")
            .with_status(404)
            .with_body("{}")
            .create_async()
            .await;

        let source = source_for(&server);
        let err = source
            .events_for_day("ghost", digest_date(), Chicago)
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::CalendarNotFound(id) if id == "ghost"));
    }

    #[tokio::test]
    async fn expired_token_maps_to_authentication() {
        let mut server = mockito::Server::new_async().await;
        let _denied = server
            .mock("GET", "/users/me/calendarList/team")
            .with_status(401)
            .with_body("{}")
            .create_async()
            .await;

        let source = source_for(&server);
        let err = source
            .events_for_day("team", digest_date(), Chicago)
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Authentication(_)));
    }

    #[tokio::test]
    async fn events_without_start_are_skipped() {
        let mut server = mockito::Server::new_async().await;
        let _color = color_mock(&mut server);
        let _events = server
            .mock("GET", "/calendars/team/events")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{
                    "items": [
                        {"summary": "No start"},
                        {"summary": "Timed", "start": {"dateTime": "2026-08-07T18:00:00Z"}}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let source = source_for(&server);
        let events = source
            .events_for_day("team", digest_date(), Chicago)
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary.as_deref(), Some("Timed"));
    }
}
