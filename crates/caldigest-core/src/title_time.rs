//! Title time-annotation extraction.
//!
//! Organizers often write the event time straight into the title
//! ("Raid Night 8pm", "Council (8:30)"). [`extract`] recognizes those
//! annotations, strips them from the title, and reports the time as a
//! minute of day so it can take precedence over the calendar's own timing
//! metadata during resolution.

use std::sync::LazyLock;

use regex::Regex;

/// Annotation with a required meridiem marker and optional minutes:
/// "8pm", "8 PM", "8:00 p.m.", "(8pm)".
static MERIDIEM_REQUIRED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\(?(\d+)(:(\d\d))? ?((a|p)\.?m\.?)(\)?|\b)\s*")
        .expect("valid meridiem-required pattern")
});

/// Annotation with required minutes and an optional meridiem marker:
/// "8:30", "8:30pm". A missing marker is read as pm.
static MINUTES_REQUIRED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\(?(\d+)(:(\d\d)) ?((a|p)\.?m\.?)?(\)?|\b)\s*")
        .expect("valid minutes-required pattern")
});

/// A time annotation extracted from an event title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleTime {
    /// The title with the annotation removed and whitespace trimmed.
    pub title: String,
    /// The annotated time as hour * 60 + minute.
    pub minute_of_day: u32,
}

/// Extracts a time annotation from an event title.
///
/// The meridiem-required pattern is tried first; the minutes-required
/// pattern is only attempted when the first finds nothing, so a single
/// annotation is never matched twice. A bare "8:30" defaults to pm; the
/// evening default fits community events, though it remains a guess.
///
/// Returns `None` when no annotation is present. `title` and
/// `minute_of_day` are only ever populated together.
pub fn extract(title: &str) -> Option<TitleTime> {
    extract_with(&MERIDIEM_REQUIRED, title).or_else(|| extract_with(&MINUTES_REQUIRED, title))
}

fn extract_with(pattern: &Regex, title: &str) -> Option<TitleTime> {
    let caps = pattern.captures(title)?;

    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps.get(3).map_or(0, |m| m.as_str().parse().unwrap_or(0));
    let is_pm = caps
        .get(5)
        .is_none_or(|m| m.as_str().eq_ignore_ascii_case("p"));

    // Noon and midnight are written as 12; normalize to 0 before the
    // meridiem offset so "12am" is 0:00 and "12pm" is 12:00.
    let hour = if hour == 12 { 0 } else { hour };
    let hour = if is_pm { hour + 12 } else { hour };

    let span = caps.get(0)?;
    let cleaned = format!("{} {}", &title[..span.start()], &title[span.end()..]);

    Some(TitleTime {
        title: cleaned.trim().to_string(),
        minute_of_day: hour * 60 + minute,
    })
}
