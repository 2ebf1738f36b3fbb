use crate::cli::ux::{TerminalRenderer, get_theme};
use anyhow::{Context, Result};
use ochat_core::config::Config;
use ochat_core::session::ChatSession;
use std::io::stdout;

mod commands;
mod compl;
mod prompt;
mod repl;
mod test_utils;

pub(crate) use repl::process_message;

/// Executes the chat command, starting an interactive REPL session.
pub async fn execute(model: Option<String>, config: &Config) -> Result<()> {
    let mut session = ChatSession::from_config(config, model.as_deref())
        .context("Failed to initialize chat session")?;
    let theme = get_theme(&config.theme);
    let mut stdout = stdout();
    let mut renderer = TerminalRenderer::new(&mut stdout, &theme);
    repl::run(&mut session, config, &mut renderer).await
}
