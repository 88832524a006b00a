use thiserror::Error;

use crate::{provider::ProviderError, types::VideoId};

#[derive(Error, Debug)]
pub enum TubenoteError {
    #[error("Missing configuration: {env_var} environment variable is not set")]
    ConfigMissing { env_var: String },

    #[error("API request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("No transcript available: {0}")]
    NoTranscript(#[from] TranscriptError),

    #[error("Summarization failed: {reason}")]
    SummarizationFailed { reason: String },

    #[error("Invalid API response: {reason}")]
    InvalidResponse { reason: String },

    #[error("Invalid transition: {0}")]
    InvalidTransition(#[from] TransitionError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<ProviderError> for TubenoteError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey { env_var, .. } => TubenoteError::ConfigMissing {
                env_var: env_var.to_string(),
            },
        }
    }
}

/// Why no transcript text could be produced for a video
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("subtitles are disabled for video {video_id}")]
    Disabled { video_id: VideoId },

    #[error("no transcript for video {video_id} in any of [{}]", .languages.join(", "))]
    NotFound {
        video_id: VideoId,
        languages: Vec<String>,
    },

    #[error("could not retrieve transcript for video {video_id}: {detail}")]
    Unknown { video_id: VideoId, detail: String },
}

/// A message that is not legal in the current session state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("video {video_id} is not in the current search results")]
    NotInSearchResults { video_id: VideoId },

    #[error("video {video_id} is not the selected video (selected: {})", .selected.as_ref().map(VideoId::as_str).unwrap_or("none"))]
    NotSelected {
        video_id: VideoId,
        selected: Option<VideoId>,
    },

    #[error("no learning record for video {video_id}")]
    UnknownVideo { video_id: VideoId },
}

pub type Result<T> = std::result::Result<T, TubenoteError>;
