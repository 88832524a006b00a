use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use tubenote_core::{Config, Provider, Services, SessionSettings, SessionStore};

use crate::{
    app::{App, Flow},
    repl::{ReplCommand, parse_line},
};

mod app;
mod render;
mod repl;

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, ValueEnum)]
enum CliProvider {
    Gemini,
    Openai,
    Grok,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Gemini => Provider::Gemini,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Grok => Provider::Grok,
        }
    }
}

#[derive(Parser)]
#[command(name = "tubenote")]
#[command(
    about = "Search YouTube, summarize transcripts with AI and keep Markdown notes per video"
)]
struct Cli {
    /// AI provider for summaries. Defaults to TUBENOTE_PROVIDER or gemini.
    #[arg(short, long)]
    provider: Option<CliProvider>,

    /// Summary language (e.g. "Japanese", "English")
    #[arg(short, long)]
    lang: Option<String>,

    /// Maximum number of search results (1-50)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=50))]
    max_results: Option<u32>,

    /// Directory for exported memos. Defaults to the Downloads folder.
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Run a search right after start
    #[arg(short, long)]
    query: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("TUBENOTE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn print_banner(config: &Config) {
    println!(
        "\n{}  {}\n",
        style("tubenote").cyan().bold(),
        style("YouTube Learning Notes").dim()
    );

    match &config.api_base_url {
        Some(base_url) => println!(
            "{} {}",
            style("Mock backend:").yellow().bold(),
            style(base_url).dim()
        ),
        None => {
            if config.youtube_api_key.is_none() {
                println!(
                    "{} YOUTUBE_API_KEY is not set, search will fail",
                    style("Warning:").yellow().bold()
                );
            }
            if let Err(e) = config.provider.validate_api_key() {
                println!("{} {}", style("Warning:").yellow().bold(), e);
            }
        }
    }

    println!(
        "{} {}  {} {}",
        style("Provider:").dim(),
        config.provider.name(),
        style("Language:").dim(),
        style(&config.summary_language).yellow()
    );
    println!("{}", style("Type `help` for commands.").dim());
    println!("{}", style("─".repeat(60)).dim());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    if let Some(provider) = cli.provider {
        config.provider = provider.into();
    }
    if let Some(lang) = cli.lang {
        config.summary_language = lang;
    }
    if let Some(max_results) = cli.max_results {
        config.max_results = max_results;
    }
    debug!(
        provider = config.provider.name(),
        mock = config.uses_mock_backend(),
        max_results = config.max_results,
        "configuration loaded"
    );

    print_banner(&config);

    let services = Services::from_config(&config)?;
    let store = SessionStore::new(services, SessionSettings::from_config(&config));
    let export_dir = cli.export_dir.unwrap_or_else(default_export_dir);
    let mut app = App::new(store, export_dir);

    if let Some(query) = cli.query {
        let keyword = query.split_whitespace().map(str::to_string).collect();
        app.handle(ReplCommand::Search { keyword }).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(style("› ").cyan().to_string().as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                // help and usage errors both land here
                let _ = e.print();
                continue;
            }
        };

        match app.handle(command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                warn!(error = %e, "command failed");
                eprintln!("{} {:#}", style("Error:").red().bold(), e);
            }
        }
    }

    Ok(())
}
