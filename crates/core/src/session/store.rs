use tracing::debug;

use crate::{
    clients::Services,
    config::Config,
    error::TransitionError,
    session::{
        message::{Command, Message, Notice},
        state::SessionState,
    },
    types::{MemoExport, Video, VideoId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub max_results: u32,
    pub summary_language: String,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_results: config.max_results,
            summary_language: config.summary_language.clone(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Drives one [`SessionState`]: applies a message, runs the command it
/// declares, and feeds the completion back before returning. Taking
/// `&mut self` keeps each session strictly turn based.
pub struct SessionStore {
    state: SessionState,
    services: Services,
    settings: SessionSettings,
}

impl SessionStore {
    pub fn new(services: Services, settings: SessionSettings) -> Self {
        Self::with_state(SessionState::new(), services, settings)
    }

    pub fn with_state(state: SessionState, services: Services, settings: SessionSettings) -> Self {
        Self {
            state,
            services,
            settings,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn set_summary_language(&mut self, language: impl Into<String>) {
        self.settings.summary_language = language.into();
    }

    pub async fn dispatch(&mut self, message: Message) -> Result<Vec<Notice>, TransitionError> {
        let mut notices = Vec::new();
        let mut next = Some(message);

        while let Some(message) = next.take() {
            let transition = self.state.update(message)?;
            notices.extend(transition.notice);
            next = self.run(transition.command).await;
        }

        Ok(notices)
    }

    async fn run(&self, command: Command) -> Option<Message> {
        match command {
            Command::None => None,
            Command::SearchVideos { keyword } => {
                debug!(%keyword, "running search");
                let result = self
                    .services
                    .search
                    .search(&keyword, self.settings.max_results)
                    .await;
                Some(Message::SearchCompleted { keyword, result })
            }
            Command::Summarize { video_id } => {
                debug!(%video_id, "running summary");
                let result = match self.services.transcripts.fetch(&video_id).await {
                    Ok(transcript) => {
                        self.services
                            .summarizer
                            .summarize(&transcript, &self.settings.summary_language)
                            .await
                    }
                    Err(err) => Err(err),
                };
                Some(Message::SummaryCompleted { video_id, result })
            }
        }
    }

    pub async fn search(&mut self, keyword: impl Into<String>) -> Vec<Notice> {
        // A search is legal in every state
        self.dispatch(Message::Search {
            keyword: keyword.into(),
        })
        .await
        .unwrap_or_default()
    }

    pub async fn select_video(&mut self, video: Video) -> Result<Vec<Notice>, TransitionError> {
        self.dispatch(Message::SelectVideo { video }).await
    }

    pub async fn request_summary(
        &mut self,
        video_id: VideoId,
    ) -> Result<Vec<Notice>, TransitionError> {
        self.dispatch(Message::RequestSummary { video_id }).await
    }

    pub async fn update_memo(
        &mut self,
        video_id: VideoId,
        text: impl Into<String>,
    ) -> Result<Vec<Notice>, TransitionError> {
        self.dispatch(Message::UpdateMemo {
            video_id,
            text: text.into(),
        })
        .await
    }

    pub async fn set_preview_mode(&mut self, enabled: bool) -> Vec<Notice> {
        self.dispatch(Message::SetPreviewMode { enabled })
            .await
            .unwrap_or_default()
    }

    pub fn export_memo(&self, video_id: &VideoId) -> Result<MemoExport, TransitionError> {
        self.state.export_memo(video_id)
    }
}
