//! Runtime configuration read from the environment.
//!
//! | Variable                        | Default        |
//! |---------------------------------|----------------|
//! | `API_BASE_URL`                  | unset (live)   |
//! | `YOUTUBE_API_KEY`               | unset          |
//! | `TUBENOTE_PROVIDER`             | `gemini`       |
//! | `TUBENOTE_SUMMARY_LANGUAGE`     | `Japanese`     |
//! | `TUBENOTE_MAX_RESULTS`          | `10`           |
//! | `TUBENOTE_TRANSCRIPT_LANGUAGES` | `ja,ja-JP,en`  |
//! | `TUBENOTE_HTTP_TIMEOUT_SECS`    | `60`           |
//!
//! Provider API keys are not part of [`Config`]; they are looked up when a
//! summary is requested so that a missing key only disables that feature.

use std::time::Duration;

use thiserror::Error;

use crate::provider::Provider;

pub const DEFAULT_SUMMARY_LANGUAGE: &str = "Japanese";
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_TRANSCRIPT_LANGUAGES: [&str; 3] = ["ja", "ja-JP", "en"];
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// When set, search, transcripts and summaries all go to this mock server
    pub api_base_url: Option<String>,
    pub youtube_api_key: Option<String>,
    pub provider: Provider,
    pub summary_language: String,
    pub max_results: u32,
    pub transcript_languages: Vec<String>,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            youtube_api_key: None,
            provider: Provider::default(),
            summary_language: DEFAULT_SUMMARY_LANGUAGE.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            transcript_languages: DEFAULT_TRANSCRIPT_LANGUAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Config {
            api_base_url: get("API_BASE_URL").map(|url| url.trim_end_matches('/').to_string()),
            youtube_api_key: get("YOUTUBE_API_KEY"),
            ..Config::default()
        };

        if let Some(provider) = get("TUBENOTE_PROVIDER") {
            config.provider = provider
                .parse()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "TUBENOTE_PROVIDER",
                    reason,
                })?;
        }
        if let Some(lang) = get("TUBENOTE_SUMMARY_LANGUAGE") {
            config.summary_language = lang.trim().to_string();
        }
        if let Some(max) = get("TUBENOTE_MAX_RESULTS") {
            config.max_results = parse_positive("TUBENOTE_MAX_RESULTS", &max)?;
        }
        if let Some(langs) = get("TUBENOTE_TRANSCRIPT_LANGUAGES") {
            let langs: Vec<String> = langs
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            if langs.is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: "TUBENOTE_TRANSCRIPT_LANGUAGES",
                    reason: "expected a comma separated list of language codes".to_string(),
                });
            }
            config.transcript_languages = langs;
        }
        if let Some(secs) = get("TUBENOTE_HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(
                parse_positive("TUBENOTE_HTTP_TIMEOUT_SECS", &secs)?.into(),
            );
        }

        Ok(config)
    }

    pub fn uses_mock_backend(&self) -> bool {
        self.api_base_url.is_some()
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            var,
            reason: format!("expected a positive integer, got '{value}'"),
        }),
    }
}
