use std::fmt;

use crate::{
    error::{Result, TranscriptError},
    types::{Video, VideoId},
};

/// Input to the session reducer: user actions plus the completions of the
/// commands those actions asked for.
#[derive(Debug)]
pub enum Message {
    Search {
        keyword: String,
    },
    SearchCompleted {
        keyword: String,
        result: Result<Vec<Video>>,
    },
    SelectVideo {
        video: Video,
    },
    RequestSummary {
        video_id: VideoId,
    },
    SummaryCompleted {
        video_id: VideoId,
        result: Result<String>,
    },
    UpdateMemo {
        video_id: VideoId,
        text: String,
    },
    SetPreviewMode {
        enabled: bool,
    },
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Message::Search { .. } => "search",
            Message::SearchCompleted { .. } => "search_completed",
            Message::SelectVideo { .. } => "select_video",
            Message::RequestSummary { .. } => "request_summary",
            Message::SummaryCompleted { .. } => "summary_completed",
            Message::UpdateMemo { .. } => "update_memo",
            Message::SetPreviewMode { .. } => "set_preview_mode",
        }
    }
}

/// Side effect declared by a transition, run by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    SearchVideos { keyword: String },
    Summarize { video_id: VideoId },
}

/// User-visible outcome of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SearchFailed { keyword: String, reason: String },
    NoResults { keyword: String },
    SummaryReady { video_id: VideoId },
    NoTranscript { video_id: VideoId, reason: TranscriptError },
    SummarizationFailed { video_id: VideoId, reason: String },
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        !matches!(self, Notice::SummaryReady { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::SearchFailed { keyword, reason } => {
                write!(f, "Search for \"{keyword}\" failed: {reason}")
            }
            Notice::NoResults { keyword } => write!(f, "No videos found for \"{keyword}\""),
            Notice::SummaryReady { .. } => write!(f, "Summary generated"),
            Notice::NoTranscript { reason, .. } => {
                write!(f, "Could not get a transcript for this video ({reason})")
            }
            Notice::SummarizationFailed { reason, .. } => {
                write!(f, "Failed to generate the summary: {reason}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub command: Command,
    pub notice: Option<Notice>,
}

impl Transition {
    pub fn none() -> Self {
        Self {
            command: Command::None,
            notice: None,
        }
    }

    pub fn command(command: Command) -> Self {
        Self {
            command,
            notice: None,
        }
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            command: Command::None,
            notice: Some(notice),
        }
    }
}
