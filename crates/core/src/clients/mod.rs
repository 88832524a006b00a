//! Adapters for the external services a session talks to.
//!
//! Each adapter sits behind a small trait so the session store can be driven
//! by in-memory fakes in tests.

pub mod search;
pub mod summarizer;
pub mod transcript;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::Config,
    error::{Result, TubenoteError},
    types::{Video, VideoId},
};

pub use search::{SearchBackend, YoutubeSearchClient};
pub use summarizer::{ChatSummarizer, SummarizerBackend};
pub use transcript::YoutubeTranscriptFetcher;

#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, keyword: &str, max_results: u32) -> Result<Vec<Video>>;
}

#[async_trait]
pub trait TranscriptFetch: Send + Sync {
    /// Fails only with [`TubenoteError::NoTranscript`]
    async fn fetch(&self, video_id: &VideoId) -> Result<String>;
}

#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, text: &str, language: &str) -> Result<String>;
}

/// The three collaborators a session needs, shareable across sessions
#[derive(Clone)]
pub struct Services {
    pub search: Arc<dyn VideoSearch>,
    pub transcripts: Arc<dyn TranscriptFetch>,
    pub summarizer: Arc<dyn Summarize>,
}

impl Services {
    pub fn new(
        search: Arc<dyn VideoSearch>,
        transcripts: Arc<dyn TranscriptFetch>,
        summarizer: Arc<dyn Summarize>,
    ) -> Self {
        Self {
            search,
            transcripts,
            summarizer,
        }
    }

    /// Build the HTTP-backed clients. With `API_BASE_URL` configured, search
    /// and summaries go to the mock server while transcripts stay live.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let search_backend = match &config.api_base_url {
            Some(base_url) => SearchBackend::Mock {
                base_url: base_url.clone(),
            },
            None => SearchBackend::Live {
                api_key: config.youtube_api_key.clone(),
            },
        };
        let summarizer_backend = match &config.api_base_url {
            Some(base_url) => SummarizerBackend::Mock {
                base_url: base_url.clone(),
            },
            None => SummarizerBackend::Live {
                provider: config.provider,
            },
        };
        let transcripts = YoutubeTranscriptFetcher::new(config.transcript_languages.clone())?;

        Ok(Self::new(
            Arc::new(YoutubeSearchClient::new(http.clone(), search_backend)),
            Arc::new(transcripts),
            Arc::new(ChatSummarizer::new(http, summarizer_backend)),
        ))
    }
}

/// Turn a non-success HTTP status into a transport error
pub(crate) fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    response.error_for_status().map_err(TubenoteError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_base_url_builds_every_client() {
        let config = Config {
            api_base_url: Some("http://localhost:5001".to_string()),
            ..Config::default()
        };
        assert!(Services::from_config(&config).is_ok());
    }
}
