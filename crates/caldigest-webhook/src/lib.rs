//! Webhook delivery for digest chunks.
//!
//! - [`WebhookPayload`] / [`Embed`] - the wire shape the platform accepts
//! - [`chunk_payload`] - chunk to payload conversion (header-once policy)
//! - [`WebhookSink`] - fire-and-forget delivery to every target

pub mod payload;
pub mod publish;

pub use payload::{Embed, HEADER_ICON, WebhookPayload, chunk_payload};
pub use publish::{DeliveryError, WebhookSink};
