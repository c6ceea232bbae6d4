// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the TUI starts. Subcommands:
// - analyze: one-shot headless analysis, printed to stdout
// - config --show / --path / --reset: configuration management

use crate::client::{Attachment, HttpAnalysisClient};
use crate::config::{Config, VERSION};
use crate::export;
use crate::model::AnalysisResult;
use crate::orchestrator::{InputState, RequestOrchestrator, ResultRenderer, SubmitMode};
use crate::prefs::PreferenceStore;
use crate::view::{self, VisibleUnit};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Study Buddy - prioritized study topics from a syllabus
#[derive(Parser)]
#[command(name = "study-buddy")]
#[command(version = VERSION)]
#[command(about = "Turn a syllabus into prioritized study topics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Start the TUI with this PDF or image already attached
    #[arg(long, value_name = "PATH")]
    pub attach: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a syllabus without the TUI and print the result
    Analyze(AnalyzeArgs),

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Syllabus text; `-` reads it from stdin
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// PDF or image to analyze
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Leave playlist links out of the output
    #[arg(long)]
    pub no_enrichment: bool,

    /// Also write the result to a PDF
    #[arg(long)]
    pub export: bool,

    /// Print the result as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    fn inputs(&self) -> Result<InputState> {
        let text = match self.text.as_deref() {
            Some("-") => {
                let mut buf = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
                    .context("Failed to read syllabus from stdin")?;
                buf
            }
            Some(text) => text.to_string(),
            None => String::new(),
        };

        let attachment = match &self.file {
            Some(path) => Some(Attachment::open(path)?),
            None => None,
        };

        Ok(InputState { text, attachment })
    }
}

/// Prints whatever the orchestrator renders
struct StdoutRenderer {
    json: bool,
    units: Vec<VisibleUnit>,
}

impl ResultRenderer for StdoutRenderer {
    fn render(&mut self, result: Arc<AnalysisResult>, enrichment_enabled: bool) {
        self.units = view::project(&result, enrichment_enabled);

        let output = if self.json {
            let mut raw = result.to_raw();
            if !enrichment_enabled {
                strip_playlists(&mut raw);
            }
            serde_json::to_string_pretty(&raw).unwrap_or_else(|_| raw.to_string())
        } else {
            let mut text = String::new();
            if let Some(subject) = &result.subject {
                text.push_str(&format!("{}\n\n", subject));
            }
            text.push_str(&view::results_text(&self.units));
            text
        };

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", output.trim_end()) {
            tracing::warn!("Failed to write result: {}", e);
        }
    }
}

/// Collapse `{ topic, playlist }` records back to plain topic strings
fn strip_playlists(raw: &mut serde_json::Value) {
    let Some(units) = raw.get_mut("units").and_then(|u| u.as_array_mut()) else {
        return;
    };
    for unit in units {
        let Some(unit) = unit.as_object_mut() else {
            continue;
        };
        for topics in unit.values_mut().filter_map(|v| v.as_array_mut()) {
            for topic in topics.iter_mut() {
                if let Some(label) = topic.get("topic").and_then(|t| t.as_str()) {
                    *topic = serde_json::Value::String(label.to_string());
                }
            }
        }
    }
}

/// Run `study-buddy analyze`
pub async fn run_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let mut inputs = args.inputs()?;
    let mode = if args.file.is_some() {
        SubmitMode::FileOnly
    } else {
        SubmitMode::TextOnly
    };
    let include_enrichment = config.include_enrichment && !args.no_enrichment;

    let client = HttpAnalysisClient::new(config.api_url.clone(), config.request_timeout())?;
    let mut orchestrator = RequestOrchestrator::new();
    let mut renderer = StdoutRenderer {
        json: args.json,
        units: Vec::new(),
    };

    if let Err(e) = orchestrator
        .run(&client, mode, &mut inputs, &mut renderer, include_enrichment)
        .await
    {
        bail!("{}", e.user_message());
    }

    if args.export {
        let path = export::export_to(&config.resolved_export_dir(), &renderer.units)?;
        eprintln!("Saved {}", path.display());
    }

    Ok(())
}

/// Handle `study-buddy config ...`
pub fn handle_config(show: bool, reset: bool, path: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset();
    } else {
        println!("Usage: study-buddy config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    println!();
    println!(
        "# Exports go to: {}",
        config.resolved_export_dir().display()
    );

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }

    if let Some(path) = PreferenceStore::default_location().path() {
        println!("# UI state: {}", path.display());
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}
