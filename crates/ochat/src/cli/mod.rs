//! ochat cli definition and entrypoint.
mod ask;
mod chat;
pub mod ux;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ochat_core::config::get_config;

use crate::log::setup_logging;

/// ochat - chat with local Ollama models from the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show verbose logs.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat with a model in an interactive session.
    Chat {
        /// Model to use, a config key or any model available in Ollama.
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Send a single message and print the reply.
    Ask {
        /// Message to send.
        #[arg(required = true)]
        message: Vec<String>,
        /// Model to use, a config key or any model available in Ollama.
        #[arg(short, long)]
        model: Option<String>,
        /// Save the exchange to the export directory.
        #[arg(long)]
        save: bool,
    },
}

/// Runs the main CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        setup_logging().context("Failed to set up logging")?;
    }

    let config = get_config(None).context("Failed to load configuration")?;

    match cli.command {
        Commands::Chat { model } => chat::execute(model, &config).await,
        Commands::Ask {
            message,
            model,
            save,
        } => ask::execute(message, model, save, &config).await,
    }
}
