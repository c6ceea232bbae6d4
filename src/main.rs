// Study Buddy - syllabus analysis client
//
// Sends syllabus text, a PDF or an image to the analysis service and shows
// the returned units as prioritized study topics.
//
// Architecture:
// - Client (reqwest): JSON and multipart requests to the service
// - Model: normalizes the service payload into units → tiers → topics
// - Orchestrator: one request at a time, loading state, input clearing
// - TUI (ratatui): input panel, results panel, copy, PDF export
// - CLI (clap): headless `analyze` and `config` subcommands

mod cli;
mod client;
mod config;
mod error;
mod export;
mod logging;
mod model;
mod orchestrator;
mod prefs;
mod tui;
mod view;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use client::Attachment;
use config::Config;
use logging::{LogBuffer, LogSink};
use orchestrator::InputState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { show, reset, path }) = &cli.command {
        cli::handle_config(*show, *reset, *path);
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();

    match cli.command {
        Some(Commands::Analyze(args)) => {
            // The guard must outlive the run so file logs flush
            let _file_guard = logging::init(&config.logging, LogSink::Stderr);
            cli::run_analyze(args, &config).await
        }
        _ => {
            let log_buffer = LogBuffer::new();
            let _file_guard = logging::init(&config.logging, LogSink::Buffer(log_buffer.clone()));

            let inputs = InputState {
                text: String::new(),
                attachment: cli.attach.as_deref().map(Attachment::open).transpose()?,
            };

            tracing::info!("Study Buddy {} using {}", config::VERSION, config.api_url);
            tui::run_tui(config, log_buffer, inputs).await
        }
    }
}
