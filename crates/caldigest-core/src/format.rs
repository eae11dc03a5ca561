//! Per-event rendering.

use crate::event::ResolvedEvent;
use crate::time::TimeCode;

/// Maximum rendered length of a single event block, in characters.
///
/// A longer block is cut at this length and marked with an ellipsis so a
/// single runaway description cannot fill a whole digest chunk by itself.
pub const EVENT_RENDER_CAP: usize = 1800;

/// Marker appended to a truncated event block.
pub const TRUNCATION_MARKER: &str = "...";

/// Formats a minute of day as a 12-hour clock label ("8:00 p.m.").
///
/// Hour 0 displays as 12; minutes are always two digits.
pub fn clock_label(minute_of_day: u32) -> String {
    let hour = minute_of_day / 60;
    let minute = minute_of_day % 60;
    let suffix = if hour >= 12 { "p.m." } else { "a.m." };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {suffix}")
}

/// Renders one resolved event as a chat-markup block.
///
/// The block is a bold bulleted title with the time in parentheses (a
/// clock label for timed events, the word "continued" for carried-over
/// events, nothing for all-day events), followed by the description on
/// its own lines when present.
pub fn render_event(event: &ResolvedEvent) -> String {
    let mut block = format!("**\u{2022} {}**", event.title);

    match event.time {
        TimeCode::Minutes(minute) => {
            block.push_str(&format!(" ({})", clock_label(minute)));
        }
        TimeCode::Continued => block.push_str(" (continued)"),
        TimeCode::AllDay => {}
    }
    block.push('\n');

    if !event.description.is_empty() {
        block.push_str(&event.description);
        block.push('\n');
    }

    if block.chars().count() > EVENT_RENDER_CAP {
        let mut cut: String = block.chars().take(EVENT_RENDER_CAP).collect();
        cut.push_str(TRUNCATION_MARKER);
        block = cut;
    }

    block
}
