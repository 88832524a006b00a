use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tubenote_core::{
    Result, Services, SessionSettings, SessionStore, Summarize, TranscriptError, TranscriptFetch,
    TubenoteError, Video, VideoId, VideoSearch,
};

pub fn video(id: &str, title: &str) -> Video {
    Video::new(id, title, format!("https://i.ytimg.com/vi/{id}/default.jpg"))
}

/// Search results keyed by keyword; unknown keywords fail like a dead server
#[derive(Default)]
pub struct ScriptedSearch {
    pub results: HashMap<String, Vec<Video>>,
}

#[async_trait]
impl VideoSearch for ScriptedSearch {
    async fn search(&self, keyword: &str, _max_results: u32) -> Result<Vec<Video>> {
        self.results
            .get(keyword)
            .cloned()
            .ok_or_else(|| TubenoteError::InvalidResponse {
                reason: format!("no fixture for '{keyword}'"),
            })
    }
}

/// Transcript outcomes that tests can change between requests
#[derive(Default)]
pub struct ScriptedTranscripts {
    pub outcomes: Mutex<HashMap<VideoId, std::result::Result<String, TranscriptError>>>,
}

impl ScriptedTranscripts {
    pub fn set(&self, video_id: &str, outcome: std::result::Result<&str, TranscriptError>) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(VideoId::from(video_id), outcome.map(str::to_string));
    }
}

#[async_trait]
impl TranscriptFetch for ScriptedTranscripts {
    async fn fetch(&self, video_id: &VideoId) -> Result<String> {
        let outcome = self.outcomes.lock().unwrap().get(video_id).cloned();
        match outcome {
            Some(Ok(text)) => Ok(text),
            Some(Err(err)) => Err(TubenoteError::NoTranscript(err)),
            None => Err(TubenoteError::NoTranscript(TranscriptError::NotFound {
                video_id: video_id.clone(),
                languages: vec!["ja".to_string()],
            })),
        }
    }
}

/// Summarizes by prefixing the transcript with a section header
pub struct HeaderSummarizer;

#[async_trait]
impl Summarize for HeaderSummarizer {
    async fn summarize(&self, text: &str, _language: &str) -> Result<String> {
        Ok(format!("## {text}"))
    }
}

pub struct Harness {
    pub store: SessionStore,
    pub transcripts: Arc<ScriptedTranscripts>,
}

pub fn harness(searches: &[(&str, Vec<Video>)]) -> Harness {
    let search = ScriptedSearch {
        results: searches
            .iter()
            .map(|(keyword, videos)| (keyword.to_string(), videos.clone()))
            .collect(),
    };
    let transcripts = Arc::new(ScriptedTranscripts::default());
    let services = Services::new(
        Arc::new(search),
        transcripts.clone(),
        Arc::new(HeaderSummarizer),
    );

    Harness {
        store: SessionStore::new(services, SessionSettings::default()),
        transcripts,
    }
}
