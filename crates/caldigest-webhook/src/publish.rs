//! Fire-and-forget digest delivery.
//!
//! Every chunk goes to every configured webhook target. Targets are
//! independent and posted to concurrently; within one target the chunks
//! go out serially because channel readers expect chunk 1 before chunk 2.
//! A failed POST is logged and forgotten: it must not block the other
//! targets, the remaining chunks, or the process exit code.

use std::time::Duration;

use futures_util::future;
use thiserror::Error;
use tracing::{info, warn};

use caldigest_core::DigestChunk;

use crate::payload::{WebhookPayload, chunk_payload};

/// A single failed webhook POST.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request never completed (connection, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The target answered with a non-success status.
    #[error("webhook returned {0}")]
    Status(reqwest::StatusCode),
}

/// The webhook delivery sink.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    http: reqwest::Client,
}

impl WebhookSink {
    /// Creates a sink with the given per-request timeout.
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");
        Self { http }
    }

    /// Publishes a digest to every target.
    ///
    /// Delivery failures are logged, never returned; the only observable
    /// outcome of a bad day is a missing message in the channel.
    pub async fn publish(
        &self,
        chunks: &[DigestChunk],
        digest_title: &str,
        public_url: Option<&str>,
        targets: &[String],
    ) {
        let payloads: Vec<WebhookPayload> = chunks
            .iter()
            .map(|chunk| chunk_payload(chunk, digest_title, public_url))
            .collect();

        let per_target = future::join_all(
            targets
                .iter()
                .enumerate()
                .map(|(index, target)| self.deliver_to_target(index, target, &payloads)),
        )
        .await;

        let delivered: usize = per_target.iter().map(|(ok, _)| ok).sum();
        let failed: usize = per_target.iter().map(|(_, bad)| bad).sum();
        if failed > 0 {
            warn!(delivered, failed, "digest delivery finished with failures");
        } else {
            info!(delivered, targets = targets.len(), "digest delivered");
        }
    }

    /// Posts all chunks to one target, in order. Returns (delivered,
    /// failed) request counts; a failed chunk does not stop the rest.
    async fn deliver_to_target(
        &self,
        target_index: usize,
        target: &str,
        payloads: &[WebhookPayload],
    ) -> (usize, usize) {
        let mut delivered = 0;
        let mut failed = 0;

        for (chunk_index, payload) in payloads.iter().enumerate() {
            match self.post(target, payload).await {
                Ok(()) => delivered += 1,
                Err(err) => {
                    failed += 1;
                    // The target URL embeds its auth token; log the index
                    // instead of the URL.
                    warn!(
                        target = target_index,
                        chunk = chunk_index,
                        error = %err,
                        "webhook delivery failed"
                    );
                }
            }
        }

        (delivered, failed)
    }

    async fn post(&self, target: &str, payload: &WebhookPayload) -> Result<(), DeliveryError> {
        let response = self.http.post(target).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status(status));
        }
        Ok(())
    }
}
