use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tracing::info;
use tubenote_core::{MemoExport, Notice, SessionStore, TransitionError, VideoId};

use crate::{
    render::{divider, render_notice, render_results, render_selected},
    repl::{PreviewArg, ReplCommand},
};

pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    store: SessionStore,
    export_dir: PathBuf,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        println!("{}", render_notice(notice));
    }
}

fn print_transition_error(err: &TransitionError) {
    eprintln!("{} {}", style("Error:").red().bold(), err);
}

/// Text of the memo with `line` appended on its own line
pub fn append_line(memo: &str, line: &str) -> String {
    if memo.is_empty() {
        line.to_string()
    } else {
        format!("{}\n{}", memo.trim_end_matches('\n'), line)
    }
}

pub async fn write_export(dir: &Path, export: &MemoExport) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(&export.filename);
    fs::write(&path, &export.content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

impl App {
    pub fn new(store: SessionStore, export_dir: PathBuf) -> Self {
        Self { store, export_dir }
    }

    fn selected(&self) -> Option<VideoId> {
        self.store.state().selected_video_id().cloned()
    }

    fn require_selected(&self) -> Option<VideoId> {
        let selected = self.selected();
        if selected.is_none() {
            println!(
                "{}",
                style("No video selected. Use `search` and `select <n>` first.").yellow()
            );
        }
        selected
    }

    pub async fn handle(&mut self, command: ReplCommand) -> Result<Flow> {
        match command {
            ReplCommand::Search { keyword } => {
                let keyword = keyword.join(" ");
                let spinner = create_spinner(&format!("Searching \"{keyword}\"..."));
                let notices = self.store.search(keyword).await;
                spinner.finish_and_clear();
                print_notices(&notices);
                print!("{}", render_results(self.store.state()));
            }

            ReplCommand::Select { index } => {
                let video = index
                    .checked_sub(1)
                    .and_then(|i| self.store.state().search_results().get(i))
                    .cloned();
                let Some(video) = video else {
                    println!(
                        "{}",
                        style(format!("There is no result number {index}.")).yellow()
                    );
                    return Ok(Flow::Continue);
                };
                match self.store.select_video(video).await {
                    Ok(_) => {
                        println!("{}", divider());
                        print!("{}", render_selected(self.store.state()));
                    }
                    Err(err) => print_transition_error(&err),
                }
            }

            ReplCommand::Summarize => {
                let Some(video_id) = self.require_selected() else {
                    return Ok(Flow::Continue);
                };
                let spinner = create_spinner(&format!(
                    "Summarizing in {}...",
                    self.store.settings().summary_language
                ));
                let result = self.store.request_summary(video_id).await;
                spinner.finish_and_clear();
                match result {
                    Ok(notices) => {
                        print_notices(&notices);
                        print!("{}", render_selected(self.store.state()));
                    }
                    Err(err) => print_transition_error(&err),
                }
            }

            ReplCommand::Memo { text } => {
                self.edit_memo(|_| text.unwrap_or_default()).await;
            }

            ReplCommand::Note { text } => {
                let line = text.unwrap_or_default();
                self.edit_memo(|memo| append_line(memo, &line)).await;
            }

            ReplCommand::Preview { mode } => {
                let enabled = match mode {
                    PreviewArg::On => true,
                    PreviewArg::Off => false,
                    PreviewArg::Toggle => !self.store.state().preview_mode(),
                };
                self.store.set_preview_mode(enabled).await;
                print!("{}", render_selected(self.store.state()));
            }

            ReplCommand::Show => {
                if !self.store.state().search_results().is_empty() {
                    print!("{}", render_results(self.store.state()));
                    println!("{}", divider());
                }
                print!("{}", render_selected(self.store.state()));
            }

            ReplCommand::Play => {
                let Some(record) = self.store.state().selected_record() else {
                    self.require_selected();
                    return Ok(Flow::Continue);
                };
                let url = record.video.watch_url();
                if let Err(err) = webbrowser::open(&url) {
                    eprintln!("{} could not open a browser: {}", style("Error:").red().bold(), err);
                }
                println!("{} {}", style("Playing").dim(), style(url).cyan());
            }

            ReplCommand::Export { dir } => {
                let Some(video_id) = self.require_selected() else {
                    return Ok(Flow::Continue);
                };
                let export = match self.store.export_memo(&video_id) {
                    Ok(export) => export,
                    Err(err) => {
                        print_transition_error(&err);
                        return Ok(Flow::Continue);
                    }
                };
                let dir = dir.unwrap_or_else(|| self.export_dir.clone());
                match write_export(&dir, &export).await {
                    Ok(path) => {
                        info!(path = %path.display(), mime_type = export.mime_type, "memo exported");
                        println!("{} {}", style("Saved:").dim(), style(path.display()).cyan());
                    }
                    Err(err) => eprintln!("{} {:#}", style("Error:").red().bold(), err),
                }
            }

            ReplCommand::Lang { language } => {
                self.store.set_summary_language(language);
                println!(
                    "{} {}",
                    style("Summary language:").dim(),
                    style(&self.store.settings().summary_language).yellow()
                );
            }

            ReplCommand::State => {
                println!("{}", serde_json::to_string_pretty(self.store.state())?);
            }

            ReplCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    async fn edit_memo<F>(&mut self, edit: F)
    where
        F: FnOnce(&str) -> String,
    {
        let Some(video_id) = self.require_selected() else {
            return;
        };
        if self.store.state().preview_mode() {
            println!(
                "{}",
                style("The memo is in preview. Run `preview off` to edit it.").yellow()
            );
            return;
        }

        let text = edit(self.store.state().memo_buffer().text());
        match self.store.update_memo(video_id, text).await {
            Ok(_) => print!("{}", render_selected(self.store.state())),
            Err(err) => print_transition_error(&err),
        }
    }
}
