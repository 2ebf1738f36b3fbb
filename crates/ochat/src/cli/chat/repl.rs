use crate::cli::chat::commands::{CliCommand, parse_command_line};
use crate::cli::chat::compl::Repl;
use crate::cli::chat::prompt::format_status_prompt;
use crate::cli::ux::{GenerationSpinner, RevealDisplay, TerminalRenderer, format_footer};
use anyhow::Result;
use clap::{CommandFactory, Parser};
use ochat_core::config::Config;
use ochat_core::session::ChatSession;
use rustyline::error::ReadlineError;
use rustyline::{CompletionType, Editor};
use std::time::Instant;
use tracing::debug;

/// Runs the interactive chat loop until the user exits.
pub async fn run(
    session: &mut ChatSession,
    config: &Config,
    renderer: &mut TerminalRenderer<'_>,
) -> Result<()> {
    println!("Welcome to ochat! Type '/help' for commands, '/q' to exit.");

    let rl_config = rustyline::Config::builder()
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let command_names = CliCommand::command()
        .get_subcommands()
        .flat_map(|c| c.get_name_and_visible_aliases())
        .map(|s| format!("/{s}"))
        .collect::<Vec<_>>();

    let mut rl = Editor::with_config(rl_config)?;
    rl.set_helper(Some(Repl {
        command_names,
        model_names: config.model_names(),
    }));

    loop {
        let prompt = format_status_prompt(session);
        match rl.readline(&prompt) {
            Ok(line) => {
                rl.add_history_entry(&line)?;
                let trimmed_line = line.trim();

                if trimmed_line.is_empty() {
                    continue;
                }

                if trimmed_line.starts_with('/') {
                    match CliCommand::try_parse_from(parse_command_line(trimmed_line)) {
                        Ok(cli_command) => {
                            if !cli_command.command.execute(session, config)? {
                                return Ok(());
                            }
                        }
                        Err(e) => {
                            e.print()?;
                        }
                    }
                } else {
                    process_message(session, renderer, &line).await?;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Type /quit to exit.");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nBye!");
                return Ok(());
            }
            Err(err) => {
                return Err(err.into());
            }
        }
    }
}

/// Sends `message` and reveals the reply, then prints the footer.
pub async fn process_message(
    session: &mut ChatSession,
    renderer: &mut TerminalRenderer<'_>,
    message: &str,
) -> Result<()> {
    // Clear renderer state for this new reply.
    renderer.clear();

    let start = Instant::now();
    let spinner = GenerationSpinner::new("Thinking...".to_string());
    let mut display = RevealDisplay::new(renderer, spinner);
    let result = session.submit(message, &mut display).await;
    display.finish();

    if result?.is_some() {
        let elapsed = start.elapsed();
        debug!(elapsed_ms = elapsed.as_millis() as u64, "Reply revealed");
        println!("{}", format_footer(elapsed));
    }
    Ok(())
}
