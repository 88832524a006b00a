use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::TransitionError,
    format::memo_filename,
    types::{LearningRecord, MemoExport, Video, VideoId},
};

/// Contents of the memo edit field and the video it belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemoBuffer {
    video_id: Option<VideoId>,
    text: String,
}

impl MemoBuffer {
    pub fn video_id(&self) -> Option<&VideoId> {
        self.video_id.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn bind(&mut self, video_id: VideoId, text: &str) {
        self.video_id = Some(video_id);
        self.text = text.to_string();
    }

    pub(crate) fn unbind(&mut self) {
        self.video_id = None;
        self.text.clear();
    }
}

/// Which representation of the memo the View shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoView<'a> {
    Edit(&'a str),
    Preview(&'a str),
}

/// Everything one session knows. Fields are only changed through
/// [`SessionState::update`], which keeps the selection backed by a record.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub(crate) session_id: Uuid,
    pub(crate) search_keyword: String,
    pub(crate) search_results: Vec<Video>,
    pub(crate) selected_video_id: Option<VideoId>,
    pub(crate) learning_data: HashMap<VideoId, LearningRecord>,
    pub(crate) preview_mode: bool,
    pub(crate) memo_buffer: MemoBuffer,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(session_id: Uuid) -> Self {
        Self {
            session_id,
            search_keyword: String::new(),
            search_results: Vec::new(),
            selected_video_id: None,
            learning_data: HashMap::new(),
            preview_mode: false,
            memo_buffer: MemoBuffer::default(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn search_keyword(&self) -> &str {
        &self.search_keyword
    }

    pub fn search_results(&self) -> &[Video] {
        &self.search_results
    }

    pub fn selected_video_id(&self) -> Option<&VideoId> {
        self.selected_video_id.as_ref()
    }

    pub fn selected_record(&self) -> Option<&LearningRecord> {
        self.selected_video_id
            .as_ref()
            .and_then(|id| self.learning_data.get(id))
    }

    pub fn record(&self, video_id: &VideoId) -> Option<&LearningRecord> {
        self.learning_data.get(video_id)
    }

    pub fn learning_data(&self) -> &HashMap<VideoId, LearningRecord> {
        &self.learning_data
    }

    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    pub fn memo_buffer(&self) -> &MemoBuffer {
        &self.memo_buffer
    }

    /// The memo pane for the selected video, `None` when nothing is selected
    pub fn memo_view(&self) -> Option<MemoView<'_>> {
        let record = self.selected_record()?;
        Some(if self.preview_mode {
            MemoView::Preview(&record.memo)
        } else {
            MemoView::Edit(self.memo_buffer.text())
        })
    }

    pub fn find_result(&self, video_id: &VideoId) -> Option<&Video> {
        self.search_results.iter().find(|v| &v.id == video_id)
    }

    /// Build the Markdown download for a video's memo
    pub fn export_memo(&self, video_id: &VideoId) -> Result<MemoExport, TransitionError> {
        let record = self
            .learning_data
            .get(video_id)
            .ok_or_else(|| TransitionError::UnknownVideo {
                video_id: video_id.clone(),
            })?;

        Ok(MemoExport {
            filename: memo_filename(&record.video.title),
            mime_type: MemoExport::MIME_TYPE,
            content: record.memo.clone(),
        })
    }

    pub(crate) fn require_selected(&self, video_id: &VideoId) -> Result<(), TransitionError> {
        if self.selected_video_id.as_ref() == Some(video_id) {
            Ok(())
        } else {
            Err(TransitionError::NotSelected {
                video_id: video_id.clone(),
                selected: self.selected_video_id.clone(),
            })
        }
    }

    /// Copy the selected record's memo into the edit buffer, or clear the
    /// buffer when nothing is selected.
    pub(crate) fn reseed_memo_buffer(&mut self) {
        let seed = self
            .selected_video_id
            .as_ref()
            .and_then(|id| self.learning_data.get(id).map(|r| (id.clone(), r.memo.clone())));

        match seed {
            Some((id, memo)) => self.memo_buffer.bind(id, &memo),
            None => self.memo_buffer.unbind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = SessionState::new();
        assert_eq!(state.search_keyword(), "");
        assert!(state.search_results().is_empty());
        assert_eq!(state.selected_video_id(), None);
        assert!(state.learning_data().is_empty());
        assert!(!state.preview_mode());
        assert_eq!(state.memo_view(), None);
        assert_eq!(state.memo_buffer(), &MemoBuffer::default());
    }

    #[test]
    fn export_uses_record_title_and_memo() {
        let mut state = SessionState::new();
        let video = Video::new("v1", "Rust: <basics>", "https://i.ytimg.com/vi/v1/default.jpg");
        let mut record = LearningRecord::new(video);
        record.memo = "## notes\n- ownership".to_string();
        state.learning_data.insert(VideoId::from("v1"), record);

        let export = state.export_memo(&VideoId::from("v1")).unwrap();
        assert_eq!(
            export,
            MemoExport {
                filename: "Rust- -basics-_memo.md".to_string(),
                mime_type: "text/markdown",
                content: "## notes\n- ownership".to_string(),
            }
        );
    }

    #[test]
    fn export_of_unknown_video_fails() {
        let state = SessionState::new();
        assert_matches!(
            state.export_memo(&VideoId::from("missing")),
            Err(TransitionError::UnknownVideo { .. })
        );
    }
}
