use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    clients::{VideoSearch, check_status},
    error::{Result, TubenoteError},
    types::Video,
};

pub const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
pub const YOUTUBE_API_KEY_VAR: &str = "YOUTUBE_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBackend {
    /// Fixture server exposing `GET /youtube/search?q=...`
    Mock { base_url: String },
    /// YouTube Data API v3; a missing key fails at search time
    Live { api_key: Option<String> },
}

pub struct YoutubeSearchClient {
    http: reqwest::Client,
    backend: SearchBackend,
}

/// Shape shared by the Data API and the mock fixture
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    default: Thumbnail,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl YoutubeSearchClient {
    pub fn new(http: reqwest::Client, backend: SearchBackend) -> Self {
        Self { http, backend }
    }

    fn request(&self, keyword: &str, max_results: u32) -> Result<reqwest::RequestBuilder> {
        match &self.backend {
            SearchBackend::Mock { base_url } => Ok(self
                .http
                .get(format!("{base_url}/youtube/search"))
                .query(&[("q", keyword)])),
            SearchBackend::Live { api_key } => {
                let api_key = api_key.as_deref().ok_or_else(|| TubenoteError::ConfigMissing {
                    env_var: YOUTUBE_API_KEY_VAR.to_string(),
                })?;
                let max_results = max_results.to_string();
                Ok(self.http.get(YOUTUBE_SEARCH_URL).query(&[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("q", keyword),
                    ("maxResults", max_results.as_str()),
                    ("key", api_key),
                ]))
            }
        }
    }
}

/// Normalize a search payload into videos, keeping the API order and
/// dropping items that are not videos.
pub fn parse_search_response(body: &str) -> Result<Vec<Video>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.video_id?;
            Some(Video::new(id, item.snippet.title, item.snippet.thumbnails.default.url))
        })
        .collect())
}

#[async_trait]
impl VideoSearch for YoutubeSearchClient {
    async fn search(&self, keyword: &str, max_results: u32) -> Result<Vec<Video>> {
        let mock = matches!(self.backend, SearchBackend::Mock { .. });
        debug!(keyword, max_results, mock, "searching videos");
        let request = self.request(keyword, max_results)?;
        let body = check_status(request.send().await?)?.text().await?;
        let mut videos = parse_search_response(&body)?;
        // The mock server ignores maxResults
        videos.truncate(max_results as usize);

        if videos.is_empty() {
            info!(keyword, "search returned no videos");
        }
        Ok(videos)
    }
}
