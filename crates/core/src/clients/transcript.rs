use async_trait::async_trait;
use tracing::{debug, info};
use yt_transcript_rs::{
    FetchedTranscript,
    api::YouTubeTranscriptApi,
    errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason},
};

use crate::{
    clients::TranscriptFetch,
    error::{Result, TranscriptError, TubenoteError},
    format::join_transcript_segments,
    types::{TranscriptSegment, VideoId},
};

/// Coarse outcome of a failed caption lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    Disabled,
    NotFound,
    Other,
}

impl LookupFailure {
    pub fn of(reason: Option<&CouldNotRetrieveTranscriptReason>) -> Self {
        match reason {
            Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled) => LookupFailure::Disabled,
            Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
                LookupFailure::NotFound
            }
            _ => LookupFailure::Other,
        }
    }

    pub fn into_error(
        self,
        video_id: &VideoId,
        languages: &[String],
        detail: impl Into<String>,
    ) -> TranscriptError {
        match self {
            LookupFailure::Disabled => TranscriptError::Disabled {
                video_id: video_id.clone(),
            },
            LookupFailure::NotFound => TranscriptError::NotFound {
                video_id: video_id.clone(),
                languages: languages.to_vec(),
            },
            LookupFailure::Other => TranscriptError::Unknown {
                video_id: video_id.clone(),
                detail: detail.into(),
            },
        }
    }
}

/// Map a caption lookup failure onto the three transcript error kinds
pub fn classify_failure(
    video_id: &VideoId,
    languages: &[String],
    err: &CouldNotRetrieveTranscript,
) -> TranscriptError {
    LookupFailure::of(err.reason.as_ref()).into_error(video_id, languages, err.to_string())
}

/// Plain text of a fetched transcript, or `None` when it holds no words
pub fn transcript_text(transcript: &FetchedTranscript) -> Option<String> {
    let segments: Vec<TranscriptSegment> = transcript
        .snippets
        .iter()
        .map(|snippet| TranscriptSegment {
            start: snippet.start,
            duration: snippet.duration,
            text: snippet.text.replace('\n', " "),
        })
        .collect();

    let text = join_transcript_segments(&segments);
    (!text.is_empty()).then_some(text)
}

pub struct YoutubeTranscriptFetcher {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YoutubeTranscriptFetcher {
    pub fn new(languages: Vec<String>) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            TubenoteError::InvalidResponse {
                reason: format!("could not set up the transcript client: {e}"),
            }
        })?;
        Ok(Self { api, languages })
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    async fn fetch_text(&self, video_id: &VideoId) -> std::result::Result<String, TranscriptError> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let transcript = self
            .api
            .fetch_transcript(video_id.as_str(), &languages, false)
            .await
            .map_err(|e| classify_failure(video_id, &self.languages, &e))?;
        debug!(
            %video_id,
            language = %transcript.language_code,
            generated = transcript.is_generated,
            snippets = transcript.snippets.len(),
            "transcript fetched"
        );

        transcript_text(&transcript).ok_or_else(|| {
            LookupFailure::Other.into_error(
                video_id,
                &self.languages,
                "caption track contains no text",
            )
        })
    }
}

#[async_trait]
impl TranscriptFetch for YoutubeTranscriptFetcher {
    async fn fetch(&self, video_id: &VideoId) -> Result<String> {
        self.fetch_text(video_id).await.map_err(|err| {
            info!(%video_id, error = %err, "transcript unavailable");
            TubenoteError::NoTranscript(err)
        })
    }
}
