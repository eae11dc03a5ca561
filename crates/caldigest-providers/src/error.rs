//! Error types for calendar source operations.

use thiserror::Error;

/// An error from a calendar source.
///
/// A missing calendar is its own variant because the digest run treats it
/// differently from transport problems: the calendar is skipped and the
/// run continues with the rest of the configuration.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The configured calendar does not exist or is not visible to the
    /// authenticated account.
    #[error("calendar not found: {0}")]
    CalendarNotFound(String),

    /// Credentials are missing, expired, or rejected.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The account is authenticated but not allowed to read the calendar.
    #[error("access denied: {0}")]
    Authorization(String),

    /// Connection failure, timeout, or other transport problem.
    #[error("network error: {0}")]
    Network(String),

    /// The service asked us to back off.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The service reported a server-side failure.
    #[error("calendar service error: {0}")]
    Server(String),

    /// The response could not be parsed into the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl SourceError {
    /// Returns `true` when the failure is transient and a later run may
    /// succeed without configuration changes.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::RateLimited(_) | Self::Server(_)
        )
    }
}

/// Specialized result for source operations.
pub type SourceResult<T> = Result<T, SourceError>;
