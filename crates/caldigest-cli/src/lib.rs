//! The `caldigest` command-line interface.
//!
//! One invocation posts one day's digest; a host scheduler provides the
//! daily trigger.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::AppConfig;
pub use error::{CliError, CliResult};
