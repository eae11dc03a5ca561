//! Webhook payload types.
//!
//! The delivery platform accepts one JSON shape: an empty top-level
//! `content` and a single embed carrying the chunk body. The header chunk
//! additionally gets the embed title (icon marker plus the configured
//! digest title) and, when configured, a link to the public calendar.

use serde::{Deserialize, Serialize};

use caldigest_core::DigestChunk;

/// Icon marker prepended to the digest title in the header embed.
pub const HEADER_ICON: &str = ":calendar_spiral: ";

/// The JSON body POSTed to a webhook target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Always empty; the platform allows empty content when embeds are
    /// present, and all digest text lives in the embed.
    pub content: String,
    /// Exactly one embed per payload.
    pub embeds: Vec<Embed>,
}

/// A single embed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    /// The chunk body.
    pub description: String,
    /// Digest title; only present on the header chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Public calendar link; only present on the header chunk, and only
    /// when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Builds the payload for one digest chunk.
pub fn chunk_payload(
    chunk: &DigestChunk,
    digest_title: &str,
    public_url: Option<&str>,
) -> WebhookPayload {
    let mut embed = Embed {
        description: chunk.body.clone(),
        title: None,
        url: None,
    };

    if chunk.has_header {
        embed.title = Some(format!("{HEADER_ICON}{digest_title}"));
        embed.url = public_url.map(str::to_string);
    }

    WebhookPayload {
        content: String::new(),
        embeds: vec![embed],
    }
}
