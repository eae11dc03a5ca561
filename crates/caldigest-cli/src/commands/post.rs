//! The digest run: fetch, resolve, build, deliver.
//!
//! One invocation processes one civil day. Nothing persists between runs;
//! rerunning the command reprocesses the day from scratch and posts
//! again, so overlapping host triggers can at worst duplicate a post.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

use caldigest_core::{CalendarEvent, build_digest, day_start, resolve_events};
use caldigest_providers::google::{GoogleCalendarClient, GoogleCalendarSource};
use caldigest_providers::{CalendarSource, normalize_events};
use caldigest_webhook::WebhookSink;

use crate::config::{AppConfig, resolve_secret};
use crate::error::{CliError, CliResult};

/// Runs the digest for `date`, defaulting to today in the configured
/// timezone. With `dry_run` the chunks are printed instead of posted.
pub async fn run(config: &AppConfig, date: Option<NaiveDate>, dry_run: bool) -> CliResult<()> {
    let tz = config.timezone()?;
    let date = date.unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());

    let token = config
        .google
        .access_token
        .as_deref()
        .ok_or_else(|| CliError::Config("google.access_token is not set".to_string()))?;
    let token = resolve_secret(token)?;

    let client =
        GoogleCalendarClient::new(token, Duration::from_secs(config.google.timeout_secs));
    let source = GoogleCalendarSource::new(client);

    let events = collect_events(&source, &config.google.calendar_ids, date, tz).await;
    info!(%date, events = events.len(), "collected events");

    let resolved = resolve_events(&events, day_start(date, tz), tz);
    let chunks = build_digest(resolved);

    if dry_run {
        for (index, chunk) in chunks.iter().enumerate() {
            println!("--- chunk {} (header: {}) ---", index + 1, chunk.has_header);
            println!("{}", chunk.body);
            println!();
        }
        return Ok(());
    }

    let sink = WebhookSink::new(Duration::from_secs(config.webhooks.timeout_secs));
    sink.publish(
        &chunks,
        &config.digest.title,
        config.digest.public_url.as_deref(),
        &config.webhooks.urls,
    )
    .await;

    Ok(())
}

/// Reads every configured calendar for the day.
///
/// A calendar that cannot be fetched is logged and skipped; the digest is
/// built from whatever the remaining calendars return.
async fn collect_events(
    source: &dyn CalendarSource,
    calendar_ids: &[String],
    date: NaiveDate,
    tz: Tz,
) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for calendar_id in calendar_ids {
        match source.events_for_day(calendar_id, date, tz).await {
            Ok(raw) => events.extend(normalize_events(&raw, tz)),
            Err(err) => warn!(calendar = %calendar_id, error = %err, "skipping calendar"),
        }
    }

    events
}
