use tracing::{debug, info};

use crate::{
    error::{TransitionError, TubenoteError},
    session::{
        message::{Command, Message, Notice, Transition},
        state::SessionState,
    },
    types::LearningRecord,
};

impl SessionState {
    /// Apply one message. Illegal messages return an error and leave the
    /// state exactly as it was.
    pub fn update(&mut self, message: Message) -> Result<Transition, TransitionError> {
        debug!(session_id = %self.session_id, message = message.name(), "update");

        match message {
            Message::Search { keyword } => Ok(Transition::command(Command::SearchVideos { keyword })),

            Message::SearchCompleted { keyword, result } => {
                let (results, notice) = match result {
                    Ok(videos) if videos.is_empty() => (
                        Vec::new(),
                        Some(Notice::NoResults {
                            keyword: keyword.clone(),
                        }),
                    ),
                    Ok(videos) => (videos, None),
                    Err(err) => {
                        info!(%keyword, error = %err, "search failed, showing no results");
                        (
                            Vec::new(),
                            Some(Notice::SearchFailed {
                                keyword: keyword.clone(),
                                reason: err.to_string(),
                            }),
                        )
                    }
                };

                info!(%keyword, results = results.len(), "search completed");
                self.search_keyword = keyword;
                self.search_results = results;
                self.selected_video_id = None;
                self.reseed_memo_buffer();

                Ok(Transition {
                    command: Command::None,
                    notice,
                })
            }

            Message::SelectVideo { video } => {
                let video = self
                    .find_result(&video.id)
                    .cloned()
                    .ok_or(TransitionError::NotInSearchResults { video_id: video.id })?;

                self.learning_data
                    .entry(video.id.clone())
                    .or_insert_with(|| LearningRecord::new(video.clone()));
                self.selected_video_id = Some(video.id);
                self.reseed_memo_buffer();

                Ok(Transition::none())
            }

            Message::RequestSummary { video_id } => {
                self.require_selected(&video_id)?;
                Ok(Transition::command(Command::Summarize { video_id }))
            }

            Message::SummaryCompleted { video_id, result } => {
                self.require_selected(&video_id)?;
                let record = self
                    .learning_data
                    .get_mut(&video_id)
                    .ok_or_else(|| TransitionError::UnknownVideo {
                        video_id: video_id.clone(),
                    })?;

                let notice = match result {
                    Ok(summary) if !summary.trim().is_empty() => {
                        record.summary = summary;
                        info!(%video_id, "summary stored");
                        Notice::SummaryReady { video_id }
                    }
                    Ok(_) => Notice::SummarizationFailed {
                        video_id,
                        reason: "model returned an empty summary".to_string(),
                    },
                    Err(TubenoteError::NoTranscript(reason)) => {
                        Notice::NoTranscript { video_id, reason }
                    }
                    Err(err) => Notice::SummarizationFailed {
                        video_id,
                        reason: err.to_string(),
                    },
                };

                Ok(Transition::notice(notice))
            }

            Message::UpdateMemo { video_id, text } => {
                self.require_selected(&video_id)?;
                let record = self
                    .learning_data
                    .get_mut(&video_id)
                    .ok_or_else(|| TransitionError::UnknownVideo {
                        video_id: video_id.clone(),
                    })?;

                record.memo = text;
                self.memo_buffer.bind(video_id, &record.memo);
                Ok(Transition::none())
            }

            Message::SetPreviewMode { enabled } => {
                self.preview_mode = enabled;
                if !enabled {
                    self.reseed_memo_buffer();
                }
                Ok(Transition::none())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::TranscriptError,
        session::state::MemoView,
        types::{Video, VideoId},
    };

    fn video(id: &str) -> Video {
        Video::new(id, format!("title {id}"), format!("https://i.ytimg.com/vi/{id}/default.jpg"))
    }

    fn searched(ids: &[&str]) -> SessionState {
        let mut state = SessionState::new();
        state
            .update(Message::SearchCompleted {
                keyword: "rust".to_string(),
                result: Ok(ids.iter().map(|id| video(id)).collect()),
            })
            .unwrap();
        state
    }

    fn selected(ids: &[&str], id: &str) -> SessionState {
        let mut state = searched(ids);
        state.update(Message::SelectVideo { video: video(id) }).unwrap();
        state
    }

    #[test]
    fn search_declares_a_search_command_only() {
        let mut state = selected(&["a"], "a");
        let transition = state
            .update(Message::Search {
                keyword: "async".to_string(),
            })
            .unwrap();

        assert_eq!(
            transition,
            Transition::command(Command::SearchVideos {
                keyword: "async".to_string()
            })
        );
        // Nothing changes until the search completes
        assert_eq!(state.search_keyword(), "rust");
        assert_eq!(state.selected_video_id(), Some(&VideoId::from("a")));
    }

    #[test]
    fn completed_search_replaces_results_and_clears_selection() {
        let mut state = selected(&["a", "b"], "a");
        let transition = state
            .update(Message::SearchCompleted {
                keyword: "go".to_string(),
                result: Ok(vec![video("c")]),
            })
            .unwrap();

        assert_eq!(transition, Transition::none());
        assert_eq!(state.search_keyword(), "go");
        assert_eq!(state.search_results(), &[video("c")]);
        assert_eq!(state.selected_video_id(), None);
        assert_eq!(state.memo_buffer().video_id(), None);
        assert!(state.record(&VideoId::from("a")).is_some());
    }

    #[test]
    fn failed_search_shows_empty_results_and_notice() {
        let mut state = selected(&["a"], "a");
        let transition = state
            .update(Message::SearchCompleted {
                keyword: "rust".to_string(),
                result: Err(TubenoteError::ConfigMissing {
                    env_var: "YOUTUBE_API_KEY".to_string(),
                }),
            })
            .unwrap();

        assert_matches!(transition.notice, Some(Notice::SearchFailed { keyword, .. }) if keyword == "rust");
        assert!(state.search_results().is_empty());
        assert_eq!(state.selected_video_id(), None);
    }

    #[test]
    fn empty_search_result_is_reported() {
        let mut state = SessionState::new();
        let transition = state
            .update(Message::SearchCompleted {
                keyword: String::new(),
                result: Ok(vec![]),
            })
            .unwrap();
        assert_eq!(
            transition.notice,
            Some(Notice::NoResults {
                keyword: String::new()
            })
        );
    }

    #[test]
    fn select_creates_empty_record_once() {
        let mut state = selected(&["a", "b"], "a");
        let record = state.record(&VideoId::from("a")).unwrap();
        assert_eq!(record, &LearningRecord::new(video("a")));

        state
            .update(Message::UpdateMemo {
                video_id: VideoId::from("a"),
                text: "kept".to_string(),
            })
            .unwrap();
        state.update(Message::SelectVideo { video: video("a") }).unwrap();

        assert_eq!(state.learning_data().len(), 1);
        assert_eq!(state.record(&VideoId::from("a")).unwrap().memo, "kept");
    }

    #[test]
    fn select_outside_results_is_rejected() {
        let mut state = selected(&["a"], "a");
        let err = state.update(Message::SelectVideo { video: video("z") }).unwrap_err();

        assert_eq!(
            err,
            TransitionError::NotInSearchResults {
                video_id: VideoId::from("z")
            }
        );
        assert_eq!(state.selected_video_id(), Some(&VideoId::from("a")));
        assert!(state.record(&VideoId::from("z")).is_none());
    }

    #[test]
    fn select_keeps_the_search_result_copy() {
        let mut state = searched(&["a"]);
        let stale = Video::new("a", "renamed elsewhere", "");
        state.update(Message::SelectVideo { video: stale }).unwrap();
        assert_eq!(state.selected_record().unwrap().video, video("a"));
    }

    #[test]
    fn summary_request_requires_selection() {
        let mut state = selected(&["a", "b"], "a");
        assert_matches!(
            state.update(Message::RequestSummary {
                video_id: VideoId::from("b")
            }),
            Err(TransitionError::NotSelected { selected: Some(id), .. }) if id == VideoId::from("a")
        );

        let transition = state
            .update(Message::RequestSummary {
                video_id: VideoId::from("a"),
            })
            .unwrap();
        assert_eq!(
            transition.command,
            Command::Summarize {
                video_id: VideoId::from("a")
            }
        );
    }

    #[test]
    fn summary_failure_keeps_previous_summary() {
        let mut state = selected(&["a"], "a");
        state
            .update(Message::SummaryCompleted {
                video_id: VideoId::from("a"),
                result: Ok("## S1".to_string()),
            })
            .unwrap();

        let reason = TranscriptError::Disabled {
            video_id: VideoId::from("a"),
        };
        let transition = state
            .update(Message::SummaryCompleted {
                video_id: VideoId::from("a"),
                result: Err(TubenoteError::NoTranscript(reason.clone())),
            })
            .unwrap();
        assert_eq!(
            transition.notice,
            Some(Notice::NoTranscript {
                video_id: VideoId::from("a"),
                reason
            })
        );

        let transition = state
            .update(Message::SummaryCompleted {
                video_id: VideoId::from("a"),
                result: Ok("   ".to_string()),
            })
            .unwrap();
        assert_matches!(transition.notice, Some(Notice::SummarizationFailed { .. }));

        assert_eq!(state.selected_record().unwrap().summary, "## S1");
    }

    #[test]
    fn summary_for_unselected_video_is_rejected() {
        let mut state = selected(&["a", "b"], "a");
        state.update(Message::SelectVideo { video: video("b") }).unwrap();

        let err = state
            .update(Message::SummaryCompleted {
                video_id: VideoId::from("a"),
                result: Ok("## late".to_string()),
            })
            .unwrap_err();

        assert_eq!(
            err,
            TransitionError::NotSelected {
                video_id: VideoId::from("a"),
                selected: Some(VideoId::from("b")),
            }
        );
        assert_eq!(state.record(&VideoId::from("a")).unwrap().summary, "");
    }

    #[test]
    fn memo_update_requires_selection() {
        let mut state = searched(&["a"]);
        assert_matches!(
            state.update(Message::UpdateMemo {
                video_id: VideoId::from("a"),
                text: "x".to_string(),
            }),
            Err(TransitionError::NotSelected { selected: None, .. })
        );
        assert!(state.learning_data().is_empty());
    }

    #[test]
    fn memo_update_writes_record_and_buffer() {
        let mut state = selected(&["a"], "a");
        state
            .update(Message::UpdateMemo {
                video_id: VideoId::from("a"),
                text: "line".to_string(),
            })
            .unwrap();

        assert_eq!(state.selected_record().unwrap().memo, "line");
        assert_eq!(state.memo_view(), Some(MemoView::Edit("line")));
    }

    #[test]
    fn switching_video_reseeds_buffer() {
        let mut state = selected(&["a", "b"], "a");
        state
            .update(Message::UpdateMemo {
                video_id: VideoId::from("a"),
                text: "about a".to_string(),
            })
            .unwrap();
        state.update(Message::SelectVideo { video: video("b") }).unwrap();

        assert_eq!(state.memo_buffer().video_id(), Some(&VideoId::from("b")));
        assert_eq!(state.memo_view(), Some(MemoView::Edit("")));
    }

    #[test]
    fn preview_toggle_switches_memo_view() {
        let mut state = selected(&["a"], "a");
        state
            .update(Message::UpdateMemo {
                video_id: VideoId::from("a"),
                text: "# memo".to_string(),
            })
            .unwrap();

        state.update(Message::SetPreviewMode { enabled: true }).unwrap();
        assert_eq!(state.memo_view(), Some(MemoView::Preview("# memo")));

        state.update(Message::SetPreviewMode { enabled: false }).unwrap();
        assert_eq!(state.memo_view(), Some(MemoView::Edit("# memo")));
        assert_eq!(state.selected_record().unwrap().memo, "# memo");
    }

    #[test]
    fn preview_off_after_switch_does_not_show_previous_video_memo() {
        let mut state = selected(&["a", "b"], "a");
        state
            .update(Message::UpdateMemo {
                video_id: VideoId::from("a"),
                text: "memo a".to_string(),
            })
            .unwrap();
        state.update(Message::SetPreviewMode { enabled: true }).unwrap();
        state.update(Message::SelectVideo { video: video("b") }).unwrap();
        state.update(Message::SetPreviewMode { enabled: false }).unwrap();

        assert_eq!(state.memo_view(), Some(MemoView::Edit("")));
        assert_eq!(state.record(&VideoId::from("a")).unwrap().memo, "memo a");
    }
}
