//! CLI error types.

use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that abort the process.
///
/// Only deployment problems live here (unreadable config, bad timezone).
/// Calendar and webhook failures during a run are logged and skipped
/// instead; see the post command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be read, parsed, or resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configured timezone is not a known IANA name.
    #[error("invalid timezone `{0}` (expected an IANA name like America/Chicago)")]
    Timezone(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
