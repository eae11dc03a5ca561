//! Configuration subcommands.

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Prints the effective configuration as TOML.
pub fn dump(config: &AppConfig) -> CliResult<()> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to render config: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// Checks the configuration and reports every problem found.
pub fn validate(config: &AppConfig) -> CliResult<()> {
    let problems = config.validate();
    if problems.is_empty() {
        println!("configuration OK");
        return Ok(());
    }

    for problem in &problems {
        eprintln!("- {problem}");
    }
    Err(CliError::Config(format!(
        "{} problem(s) found",
        problems.len()
    )))
}

/// Prints the default configuration file path.
pub fn path() -> CliResult<()> {
    println!("{}", AppConfig::default_path().display());
    Ok(())
}
