//! Static configuration: the Data API key and the live-page marker keywords.

use eyre::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration file.
///
/// ```json
/// {
///   "api": { "key": "..." },
///   "checker": {
///     "not_live_keyword": "...",
///     "live_keyword": "...",
///     "upcoming_keyword": "..."
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub checker: Keywords,
}

/// Credentials and locale hints for the YouTube Data API.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key sent as the `key` query parameter on every Data API call.
    pub key: String,
    /// Sent as `regionCode` on searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    /// Sent as `relevanceLanguage` on searches and `hl` on video lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

// The key must never end up in logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("key", &"<redacted>")
            .field("region_code", &self.region_code)
            .field("language", &self.language)
            .finish()
    }
}

/// Literal substrings whose presence in a channel's `/live` page reveals its state.
///
/// These track YouTube's current page markup and silently stop working when it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords {
    /// Present when the channel has nothing live.
    pub not_live_keyword: String,
    /// Present when the page shows a live (or scheduled) broadcast.
    pub live_keyword: String,
    /// Present alongside `live_keyword` when the broadcast has not started yet.
    pub upcoming_keyword: String,
}

impl Keywords {
    fn validate(&self) -> eyre::Result<()> {
        for (name, keyword) in [
            ("not_live_keyword", &self.not_live_keyword),
            ("live_keyword", &self.live_keyword),
            ("upcoming_keyword", &self.upcoming_keyword),
        ] {
            // an empty marker is contained in every page
            if keyword.is_empty() {
                eyre::bail!("checker.{name} must not be empty");
            }
        }
        Ok(())
    }
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json(json: &str) -> eyre::Result<Self> {
        let config: Config = serde_json::from_str(json).context("parse configuration JSON")?;
        if config.api.key.is_empty() {
            eyre::bail!("api.key must not be empty");
        }
        config.checker.validate()?;
        Ok(config)
    }

    /// Reads and validates the configuration file at `path`.
    pub async fn from_path(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read configuration file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("load {}", path.display()))
    }
}
