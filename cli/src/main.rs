//! # Cozmo Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Cozmo CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the layered configuration and selecting a variant
//! - Routing execution to the chat or assistant loop
//!
//! ## Examples
//!
//! ```bash
//! # Chat with the default (basic) bot
//! cozmo
//!
//! # The assistant, speaking replies aloud, with a custom name
//! cozmo --variant assistant --speech system --name Jarvis
//!
//! # Show every built-in and configured variant
//! cozmo --list-variants
//! ```
//!
//! Processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load settings (config files, then flags and environment)
//! 4. Run the selected variant and display any error that occurs
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod bot; // Rule tables, matching and reply selection
mod commands; // The chat and assistant loops
mod common; // Shared I/O utilities (prompt, speech, network, processes)
mod core; // Core infrastructure (errors, config, templating)

use crate::common::voice::SpeechBackend;
use crate::core::config::{self, Overrides};

/// Defines the command-line arguments using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "cozmo",
    about = "🤖 Cozmo: a tiny keyword-matching chatbot and virtual assistant",
    long_about = "Chat with a rule-based bot on the terminal, or run the virtual assistant.\n\
                  Replies are chosen by the first rule whose trigger occurs in your input.",
    version
)]
struct Cli {
    /// Variant to run (basic, intro, extended, assistant, or a configured one).
    #[arg(long, env = "COZMO_VARIANT")]
    variant: Option<String>,
    /// The bot's name, used in greetings and templated replies.
    #[arg(long, env = "COZMO_NAME")]
    name: Option<String>,
    /// Configuration file to use instead of the user and project files.
    #[arg(long, env = "COZMO_CONFIG")]
    config: Option<PathBuf>,
    /// How the assistant speaks its replies.
    #[arg(long, value_enum)]
    speech: Option<SpeechBackend>,
    /// Seed for random reply selection, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,
    /// List the available variants and exit.
    #[arg(long)]
    list_variants: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        tracing::error!("Cozmo failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = Overrides {
        name: cli.name,
        variant: cli.variant,
        speech: cli.speech,
    };
    let settings = config::load_settings(cli.config.as_deref(), overrides)?;

    if cli.list_variants {
        for (name, description) in settings.variant_summaries() {
            println!("{:<10} {}", name, description);
        }
        return Ok(());
    }

    let table = settings.selected_table()?;
    tracing::info!(
        "Running variant '{}' as '{}'",
        table.name,
        settings.name
    );
    if table.assistant {
        commands::assistant::handle_assistant(&settings, table, cli.seed)
    } else {
        commands::chat::handle_chat(&settings, table, cli.seed)
    }
}
