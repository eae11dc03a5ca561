//! Digest assembly: ordering events and packing them into chunks.
//!
//! The digest for a day is a short sequence of [`DigestChunk`]s, each
//! small enough for one chat message. Events are sorted once, rendered,
//! and folded into chunks; the first chunk carries the digest header.

use serde::{Deserialize, Serialize};

use crate::event::ResolvedEvent;
use crate::format;

/// Maximum body length of one digest chunk, in characters. Matches the
/// delivery platform's message size limit.
pub const CHUNK_CHAR_BUDGET: usize = 2000;

/// Intro line opening the first chunk of a non-empty digest.
pub const DIGEST_INTRO: &str = "The following events are posted for today:\n\n";

/// Body of the single chunk produced when the day has no events.
pub const EMPTY_DIGEST_TEXT: &str = "*No events are posted for today.*";

/// One message-sized unit of digest output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestChunk {
    /// The chunk body. Never longer than [`CHUNK_CHAR_BUDGET`] characters.
    pub body: String,
    /// Whether this chunk carries the digest header. True for exactly
    /// one chunk per run, always the first.
    pub has_header: bool,
}

/// Accumulator for chunk packing.
///
/// Sealed chunks are immutable once emitted; only the running body
/// mutates, so packing stays a plain fold over rendered blocks.
struct ChunkPacker {
    chunks: Vec<DigestChunk>,
    body: String,
}

impl ChunkPacker {
    fn new() -> Self {
        Self {
            chunks: Vec::new(),
            body: DIGEST_INTRO.to_string(),
        }
    }

    /// Appends one rendered block, sealing the running chunk first when
    /// the block would push it past the budget. A separator newline
    /// follows every block; it is trimmed away at the chunk boundary.
    fn push(&mut self, block: &str) {
        if self.body.chars().count() + block.chars().count() > CHUNK_CHAR_BUDGET {
            self.seal();
        }
        self.body.push_str(block);
        self.body.push('\n');
    }

    /// Seals the running chunk. The first sealed chunk is the header
    /// chunk; continuation chunks start empty, without the intro line.
    fn seal(&mut self) {
        let body = std::mem::take(&mut self.body);
        self.chunks.push(DigestChunk {
            body: body.trim().to_string(),
            has_header: self.chunks.is_empty(),
        });
    }

    fn finish(mut self) -> Vec<DigestChunk> {
        self.seal();
        self.chunks
    }
}

/// Builds the digest chunks for a day's resolved events.
///
/// Events are ordered by time code (continued first, then all-day, then
/// ascending time of day), ties broken by case-insensitive title. The
/// rendered blocks are packed into budget-bounded chunks in that order
/// and the final partial chunk is always emitted. An empty day produces
/// a single informational chunk instead.
pub fn build_digest(mut events: Vec<ResolvedEvent>) -> Vec<DigestChunk> {
    if events.is_empty() {
        return vec![DigestChunk {
            body: EMPTY_DIGEST_TEXT.to_string(),
            has_header: true,
        }];
    }

    events.sort_by(|a, b| {
        a.time
            .cmp(&b.time)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });

    let mut packer = ChunkPacker::new();
    for event in &events {
        packer.push(&format::render_event(event));
    }
    packer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeCode;

    fn event(title: &str, time: TimeCode) -> ResolvedEvent {
        ResolvedEvent {
            title: title.to_string(),
            time,
            description: String::new(),
            color: 0,
        }
    }

    fn event_with_description(title: &str, time: TimeCode, description: &str) -> ResolvedEvent {
        ResolvedEvent {
            description: description.to_string(),
            ..event(title, time)
        }
    }

    mod ordering {
        use super::*;

        #[test]
        fn sentinels_first_then_times_then_titles() {
            let chunks = build_digest(vec![
                event("Zeta", TimeCode::Minutes(600)),
                event("Fair", TimeCode::AllDay),
                event("Siege", TimeCode::Continued),
                event("Alpha", TimeCode::Minutes(600)),
            ]);

            assert_eq!(chunks.len(), 1);
            let body = &chunks[0].body;
            let position = |needle: &str| {
                body.find(needle)
                    .unwrap_or_else(|| panic!("{needle:?} missing from {body:?}"))
            };
            assert!(position("Siege") < position("Fair"));
            assert!(position("Fair") < position("Alpha"));
            assert!(position("Alpha") < position("Zeta"));
        }

        #[test]
        fn title_tiebreak_ignores_case() {
            let chunks = build_digest(vec![
                event("banquet", TimeCode::Minutes(600)),
                event("Archery", TimeCode::Minutes(600)),
            ]);

            let body = &chunks[0].body;
            assert!(body.find("Archery").unwrap() < body.find("banquet").unwrap());
        }
    }

    mod packing {
        use super::*;

        #[test]
        fn empty_day_yields_single_informational_chunk() {
            let chunks = build_digest(Vec::new());
            assert_eq!(chunks.len(), 1);
            assert_eq!(chunks[0].body, EMPTY_DIGEST_TEXT);
            assert!(chunks[0].has_header);
        }

        #[test]
        fn single_event_chunk_carries_intro_and_header() {
            let chunks = build_digest(vec![event("Raid", TimeCode::Minutes(20 * 60))]);

            assert_eq!(chunks.len(), 1);
            assert!(chunks[0].has_header);
            assert!(chunks[0].body.starts_with("The following events"));
            assert!(chunks[0].body.contains("**\u{2022} Raid** (8:00 p.m.)"));
        }

        #[test]
        fn exactly_one_header_chunk_and_it_is_first() {
            // Three near-cap events cannot share a 2000-character chunk.
            let events: Vec<_> = ["Alpha", "Bravo", "Carol"]
                .iter()
                .map(|title| {
                    event_with_description(title, TimeCode::AllDay, &"x".repeat(1700))
                })
                .collect();

            let chunks = build_digest(events);
            assert!(chunks.len() > 1);
            assert!(chunks[0].has_header);
            assert!(chunks.iter().skip(1).all(|c| !c.has_header));
            assert_eq!(chunks.iter().filter(|c| c.has_header).count(), 1);
        }

        #[test]
        fn no_chunk_exceeds_the_budget() {
            let mut events = vec![event_with_description(
                "Monster",
                TimeCode::Minutes(600),
                &"m".repeat(5000),
            )];
            for i in 0..20 {
                events.push(event_with_description(
                    &format!("Filler {i:02}"),
                    TimeCode::Minutes(610 + i),
                    &"f".repeat(180),
                ));
            }

            let chunks = build_digest(events);
            for chunk in &chunks {
                assert!(
                    chunk.body.chars().count() <= CHUNK_CHAR_BUDGET,
                    "chunk of {} chars over budget",
                    chunk.body.chars().count()
                );
            }
        }

        #[test]
        fn intro_is_not_repeated_on_continuation_chunks() {
            let events: Vec<_> = (0..4)
                .map(|i| {
                    event_with_description(
                        &format!("Event {i}"),
                        TimeCode::Minutes(600 + i),
                        &"d".repeat(900),
                    )
                })
                .collect();

            let chunks = build_digest(events);
            assert!(chunks.len() > 1);
            assert!(chunks[0].body.starts_with("The following events"));
            for chunk in chunks.iter().skip(1) {
                assert!(!chunk.body.contains("The following events"));
            }
        }

        #[test]
        fn final_partial_chunk_is_emitted() {
            let chunks = build_digest(vec![
                event_with_description("Big", TimeCode::Minutes(600), &"b".repeat(1900)),
                event_with_description("Tail", TimeCode::Minutes(700), &"t".repeat(150)),
            ]);

            assert_eq!(chunks.len(), 2);
            assert!(chunks[1].body.contains("Tail"));
        }
    }
}
