//! Digest configuration.
//!
//! All settings live in a single `config.toml` at
//! `~/.config/caldigest/config.toml` by default. The values (calendar
//! ids, webhook URLs, the digest title) are static deployment
//! configuration, not runtime flags.
//!
//! The Google access token supports an `env::VAR_NAME` reference so the
//! secret itself can stay out of the file.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Top-level configuration for the digest run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Digest presentation settings.
    pub digest: DigestSettings,

    /// Google Calendar settings.
    pub google: GoogleSettings,

    /// Webhook delivery settings.
    pub webhooks: WebhookSettings,
}

/// Presentation settings for the posted digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestSettings {
    /// Title shown in the header embed.
    pub title: String,

    /// Optional public calendar link; the header title points at it.
    pub public_url: Option<String>,

    /// IANA timezone all wall-clock conversion uses.
    pub timezone: String,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            title: "Community Calendar".to_string(),
            public_url: None,
            timezone: "America/Chicago".to_string(),
        }
    }
}

/// Google Calendar read settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// Calendar ids to read events from. The authenticated account must
    /// own or be subscribed to each of them.
    pub calendar_ids: Vec<String>,

    /// OAuth access token (supports an `env::` reference).
    pub access_token: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            calendar_ids: Vec::new(),
            access_token: None,
            timeout_secs: 30,
        }
    }
}

/// Webhook delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    /// Webhook URLs the digest is broadcast to.
    pub urls: Vec<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the default path, falling back to the
    /// defaults when no file exists yet.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("caldigest")
    }

    /// Parses the configured timezone.
    pub fn timezone(&self) -> CliResult<Tz> {
        self.digest
            .timezone
            .parse()
            .map_err(|_| CliError::Timezone(self.digest.timezone.clone()))
    }

    /// Checks the configuration for deployment problems.
    ///
    /// Returns one message per problem; an empty list means the config
    /// is usable for a posting run.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.timezone().is_err() {
            problems.push(format!("unknown timezone `{}`", self.digest.timezone));
        }
        if self.google.calendar_ids.is_empty() {
            problems.push("no calendar ids configured (google.calendar_ids)".to_string());
        }
        if self.google.access_token.is_none() {
            problems.push("no access token configured (google.access_token)".to_string());
        }
        if self.webhooks.urls.is_empty() {
            problems.push("no webhook urls configured (webhooks.urls)".to_string());
        }
        for target in &self.webhooks.urls {
            if url::Url::parse(target).is_err() {
                problems.push(format!("invalid webhook url `{target}`"));
            }
        }
        if let Some(ref public_url) = self.digest.public_url {
            if url::Url::parse(public_url).is_err() {
                problems.push(format!("invalid public url `{public_url}`"));
            }
        }

        problems
    }
}

/// Resolves a config value that may reference the environment.
///
/// `env::VAR_NAME` reads `$VAR_NAME`; anything else is used as-is.
pub fn resolve_secret(value: &str) -> CliResult<String> {
    match value.strip_prefix("env::") {
        Some(var) => std::env::var(var)
            .map_err(|_| CliError::Config(format!("environment variable `{var}` is not set"))),
        None => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_toml() -> &'static str {
        r#"
            [digest]
            title = "Guild Calendar"
            public_url = "https://cal.example.com"
            timezone = "America/Chicago"

            [google]
            calendar_ids = ["team@group.calendar.google.com"]
            access_token = "env::CALDIGEST_TOKEN"

            [webhooks]
            urls = ["https://discord.test/api/webhooks/1/abc"]
        "#
    }

    #[test]
    fn parses_full_config() {
        let config: AppConfig = toml::from_str(sample_toml()).unwrap();
        assert_eq!(config.digest.title, "Guild Calendar");
        assert_eq!(config.google.calendar_ids.len(), 1);
        assert_eq!(config.google.timeout_secs, 30);
        assert_eq!(config.webhooks.urls.len(), 1);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.digest.timezone, "America/Chicago");
        assert_eq!(config.webhooks.timeout_secs, 10);
        assert!(config.google.calendar_ids.is_empty());
    }

    #[test]
    fn load_from_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_toml().as_bytes()).unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.digest.title, "Guild Calendar");
    }

    #[test]
    fn load_from_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"digest = nope").unwrap();

        assert!(AppConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config: AppConfig = toml::from_str(sample_toml()).unwrap();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let reparsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.digest.title, config.digest.title);
        assert_eq!(reparsed.google.calendar_ids, config.google.calendar_ids);
    }

    #[test]
    fn validate_reports_problems() {
        let mut config = AppConfig::default();
        config.digest.timezone = "Mars/Olympus_Mons".to_string();
        config.webhooks.urls = vec!["not a url".to_string()];

        let problems = config.validate();
        assert!(problems.iter().any(|p| p.contains("unknown timezone")));
        assert!(problems.iter().any(|p| p.contains("invalid webhook url")));
        assert!(problems.iter().any(|p| p.contains("no calendar ids")));
        assert!(problems.iter().any(|p| p.contains("no access token")));
    }

    #[test]
    fn secret_resolution() {
        // SAFETY: test-local variable name; no other test reads it.
        unsafe { std::env::set_var("CALDIGEST_TEST_SECRET", "token-123") };
        assert_eq!(
            resolve_secret("env::CALDIGEST_TEST_SECRET").unwrap(),
            "token-123"
        );
        assert_eq!(resolve_secret("plain-token").unwrap(), "plain-token");
        assert!(resolve_secret("env::CALDIGEST_TEST_UNSET").is_err());
    }
}
