use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "tubenote",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{subcommands}"
)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PreviewArg {
    On,
    Off,
    Toggle,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    /// Search YouTube videos
    #[command(visible_alias = "s")]
    Search { keyword: Vec<String> },

    /// Select a video by its number in the result list
    #[command(visible_alias = "sel")]
    Select { index: usize },

    /// Generate an AI summary of the selected video's transcript
    Summarize,

    /// Replace the memo of the selected video (`\n` starts a new line)
    #[command(visible_alias = "m")]
    Memo {
        text: Option<String>,
    },

    /// Append a line to the memo of the selected video
    #[command(visible_alias = "n")]
    Note {
        text: Option<String>,
    },

    /// Show the memo as rendered Markdown (on) or as editable text (off)
    Preview {
        #[arg(value_enum, default_value = "toggle")]
        mode: PreviewArg,
    },

    /// Show the selected video, its summary and memo
    Show,

    /// Open the selected video in the browser
    Play,

    /// Save the selected video's memo as Markdown
    Export { dir: Option<PathBuf> },

    /// Change the summary language
    Lang { language: String },

    /// Dump the session state as JSON
    State,

    /// Leave tubenote
    #[command(visible_aliases = ["exit", "q"])]
    Quit,
}

const FREE_TEXT_COMMANDS: [&str; 4] = ["memo", "m", "note", "n"];

/// Parse one input line. Memo commands keep the rest of the line verbatim
/// so spacing and leading hyphens survive.
pub fn parse_line(line: &str) -> Result<ReplCommand, clap::Error> {
    let line = line.trim();
    let args: Vec<String> = match line.split_once(char::is_whitespace) {
        Some((head, rest)) if FREE_TEXT_COMMANDS.contains(&head) => {
            let text = rest.trim_start().replace("\\n", "\n");
            vec![head.to_string(), "--".to_string(), text]
        }
        _ => line.split_whitespace().map(str::to_string).collect(),
    };

    ReplLine::try_parse_from(args).map(|parsed| parsed.command)
}
