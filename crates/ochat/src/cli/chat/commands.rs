use crate::cli::ux::{ChatMessageType, present_save, style_chat_text};
use anyhow::Result;
use clap::{Parser, Subcommand};
use ochat_core::config::Config;
use ochat_core::export::{download, format_transcript, save_to_disk, write_download};
use ochat_core::session::ChatSession;
use std::path::PathBuf;

// -------------
// REPL commands
// -------------
/// Splits a command line shell-style. Unbalanced quotes yield no arguments.
pub fn parse_command_line(line: &str) -> Vec<String> {
    shlex::split(line).unwrap_or_default()
}

#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct CliCommand {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Save the chat to a timestamped file in the export directory
    #[command(alias = "s")]
    Save,
    /// Write the chat to chat_log.txt
    #[command(alias = "d")]
    Download {
        /// Directory to write into, defaults to the current directory
        dir: Option<PathBuf>,
    },
    /// Show the chat so far
    Log,
    /// Manage the chat model.
    ///
    /// With no arguments, shows the current model and configured models.
    #[command(alias = "m")]
    Model {
        /// Model to switch to, a config key or any model available in Ollama
        name: Option<String>,
    },
    /// Exit the chat session
    #[command(alias = "q", alias = "quit")]
    Exit,
}

impl Command {
    /// Executes a REPL command.
    ///
    /// Returns `Ok(false)` if the REPL should exit.
    pub fn execute(self, session: &mut ChatSession, config: &Config) -> Result<bool> {
        match self {
            Command::Save => {
                present_save(&save_to_disk(session.transcript(), &config.export.dir));
            }
            Command::Download { dir } => {
                let dir = dir.unwrap_or_else(|| PathBuf::from("."));
                match write_download(&download(session.transcript()), &dir) {
                    Ok(path) => println!("Chat log written to {}", path.display()),
                    Err(e) => eprintln!(
                        "{}",
                        style_chat_text(&e.to_string(), ChatMessageType::Error)
                    ),
                }
            }
            Command::Log => {
                if session.transcript().is_empty() {
                    println!("No messages yet.");
                } else {
                    println!("{}", format_transcript(session.transcript()));
                }
            }
            Command::Model { name } => match name {
                Some(name) => match session.set_model(config.model_config(&name)) {
                    Ok(()) => println!("Model switched to: {name}"),
                    Err(e) => {
                        let error_msg = format!("Error switching model: {e:#}");
                        eprintln!("{}", style_chat_text(&error_msg, ChatMessageType::Error));
                    }
                },
                None => {
                    println!("Current model: {}", session.model_key());
                    let model_names = config.model_names();
                    if !model_names.is_empty() {
                        println!("Configured models: {}", model_names.join(", "));
                    }
                }
            },
            Command::Exit => return Ok(false),
        }
        Ok(true)
    }
}
