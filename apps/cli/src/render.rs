use console::style;
use tubenote_core::{MemoView, Notice, SessionState};

pub fn divider() -> String {
    style("─".repeat(60)).dim().to_string()
}

/// Render Markdown for the terminal: headers are highlighted and bullets
/// become dots. Everything else is printed as written.
pub fn render_markdown(markdown: &str) -> String {
    markdown
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            if let Some(title) = trimmed.strip_prefix("### ") {
                style(title).bold().to_string()
            } else if let Some(title) = trimmed.strip_prefix("## ") {
                style(title).cyan().bold().to_string()
            } else if let Some(title) = trimmed.strip_prefix("# ") {
                style(title).cyan().bold().underlined().to_string()
            } else if let Some(item) = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
            {
                format!("{indent}  • {item}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_results(state: &SessionState) -> String {
    let mut output = format!(
        "{} {}\n",
        style("Results for").dim(),
        style(format!("\"{}\"", state.search_keyword())).yellow()
    );

    if state.search_results().is_empty() {
        output.push_str(&format!("  {}\n", style("No results.").dim()));
        return output;
    }

    for (i, video) in state.search_results().iter().enumerate() {
        let selected = state.selected_video_id() == Some(&video.id);
        let marker = if selected {
            style("▶").green().bold().to_string()
        } else {
            " ".to_string()
        };
        output.push_str(&format!(
            "{} {:>2}. {} {}\n",
            marker,
            i + 1,
            video.title,
            style(format!("({})", video.id)).dim()
        ));
    }
    output
}

pub fn render_selected(state: &SessionState) -> String {
    let Some(record) = state.selected_record() else {
        return format!(
            "{}\n",
            style("Search and select a video to start learning.").dim()
        );
    };

    let mut output = String::new();
    output.push_str(&format!("{}\n", style(&record.video.title).bold()));
    output.push_str(&format!("{}\n\n", style(record.video.watch_url()).cyan()));

    output.push_str(&format!("{}\n", style("AI summary").magenta().bold()));
    if record.summary.is_empty() {
        output.push_str(&format!(
            "{}\n",
            style("No summary yet. Run `summarize`.").dim()
        ));
    } else {
        output.push_str(&render_markdown(&record.summary));
        output.push('\n');
    }
    output.push('\n');

    match state.memo_view() {
        Some(MemoView::Preview(memo)) => {
            output.push_str(&format!(
                "{} {}\n",
                style("Memo").magenta().bold(),
                style("(preview)").dim()
            ));
            output.push_str(&render_markdown(memo));
            output.push('\n');
        }
        Some(MemoView::Edit(buffer)) => {
            output.push_str(&format!(
                "{} {}\n",
                style("Memo").magenta().bold(),
                style("(edit)").dim()
            ));
            for line in buffer.lines() {
                output.push_str(&format!("{} {}\n", style("│").dim(), line));
            }
        }
        None => {}
    }
    output
}

pub fn render_notice(notice: &Notice) -> String {
    if notice.is_failure() {
        format!("{} {}", style("!").red().bold(), style(notice).red())
    } else {
        format!("{} {}", style("✓").green().bold(), notice)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tubenote_core::{Message, Video, VideoId};

    use super::*;

    fn plain() {
        console::set_colors_enabled(false);
    }

    #[test]
    fn markdown_headers_and_bullets() {
        plain();
        let rendered = render_markdown("## Ownership\n- moves\n  * borrows\nplain text");
        assert_eq!(rendered, "Ownership\n  • moves\n    • borrows\nplain text");
    }

    #[test]
    fn results_mark_selected_video() {
        plain();
        let mut state = SessionState::new();
        state
            .update(Message::SearchCompleted {
                keyword: "rust".to_string(),
                result: Ok(vec![Video::new("a", "Alpha", ""), Video::new("b", "Beta", "")]),
            })
            .unwrap();
        state
            .update(Message::SelectVideo {
                video: Video::new("b", "Beta", ""),
            })
            .unwrap();

        assert_eq!(
            render_results(&state),
            "Results for \"rust\"\n   1. Alpha (a)\n▶  2. Beta (b)\n"
        );
    }

    #[test]
    fn selected_view_switches_memo_representation() {
        plain();
        let mut state = SessionState::new();
        state
            .update(Message::SearchCompleted {
                keyword: "rust".to_string(),
                result: Ok(vec![Video::new("a", "Alpha", "")]),
            })
            .unwrap();
        state
            .update(Message::SelectVideo {
                video: Video::new("a", "Alpha", ""),
            })
            .unwrap();
        state
            .update(Message::UpdateMemo {
                video_id: VideoId::from("a"),
                text: "- idea".to_string(),
            })
            .unwrap();

        let edit = render_selected(&state);
        assert!(edit.contains("Memo (edit)\n│ - idea\n"));

        state
            .update(Message::SetPreviewMode { enabled: true })
            .unwrap();
        let preview = render_selected(&state);
        assert!(preview.contains("Memo (preview)\n  • idea\n"));
    }
}
