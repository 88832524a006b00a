//! Tubenote Core Library
//!
//! Session state machine for searching YouTube videos, summarizing their
//! transcripts with an AI provider and keeping per-video memos.

pub mod clients;
pub mod config;
pub mod error;
pub mod format;
pub mod provider;
pub mod session;
pub mod types;

// Re-export commonly used items at crate root
pub use clients::{Services, Summarize, TranscriptFetch, VideoSearch};
pub use config::{Config, ConfigError};
pub use error::{Result, TranscriptError, TransitionError, TubenoteError};
pub use format::{join_transcript_segments, memo_filename, sanitize_filename};
pub use provider::{Provider, ProviderConfig, ProviderError};
pub use session::{
    Command, MemoView, Message, Notice, SessionRegistry, SessionSettings, SessionState,
    SessionStore,
};
pub use types::{LearningRecord, MemoExport, TranscriptSegment, Video, VideoId};
