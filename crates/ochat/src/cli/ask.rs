//! One-shot `ask` command.
use crate::cli::chat::process_message;
use crate::cli::ux::{TerminalRenderer, get_theme, present_save};
use anyhow::{Context, Result};
use ochat_core::config::Config;
use ochat_core::export::save_to_disk;
use ochat_core::session::ChatSession;
use std::io::stdout;
use tracing::debug;

/// Sends a single message, reveals the reply and optionally saves the exchange.
pub async fn execute(
    message: Vec<String>,
    model: Option<String>,
    save: bool,
    config: &Config,
) -> Result<()> {
    let message = message.join(" ");
    let mut session = ChatSession::from_config(config, model.as_deref())
        .context("Failed to initialize chat session")?;
    debug!(model = session.model_key(), "Asking");

    let theme = get_theme(&config.theme);
    let mut stdout = stdout();
    {
        let mut renderer = TerminalRenderer::new(&mut stdout, &theme);
        process_message(&mut session, &mut renderer, &message).await?;
    }

    if save {
        present_save(&save_to_disk(session.transcript(), &config.export.dir));
    }
    Ok(())
}
