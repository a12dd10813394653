//! Quill — terminal pair-programming assistant.
//!
//! Usage:
//!   quill                 Start the interactive prompt
//!   quill -p "request"    Run a single request and exit
//!   quill --model ...     Override the configured model

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use quill::agent::Session;
use quill::api::AnthropicClient;
use quill::config;
use quill::repl;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(version)]
#[command(about = "Terminal pair-programming assistant")]
struct Cli {
    /// Run a single request non-interactively and exit.
    #[arg(short, long)]
    prompt: Option<String>,

    /// Model identifier override.
    #[arg(long)]
    model: Option<String>,

    /// Path to the config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let mut cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(model) = cli.model {
        cfg.model = model;
    }
    if let Some(level) = cli.log_level {
        cfg.log_level = level;
    }

    // Initialize logging. Chat output goes through the REPL on stdout;
    // logs default to warn so they never interleave with it.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let client = AnthropicClient::new(&cfg);
    let mut session = Session::new(client, cfg.clone());

    match cli.prompt {
        Some(request) => {
            if let Err(e) = session.submit(&request, &mut repl::render_event).await {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
            Ok(())
        }
        None => {
            repl::print_header(&cfg);
            repl::run(&mut session).await.context("REPL I/O failure")
        }
    }
}
