use crate::cli::ux::{ChatMessageType, style_chat_text};
use ochat_core::session::ChatSession;

/// Formats the REPL prompt: a `[model: <key>]` status line, then `> `.
pub fn format_status_prompt(session: &ChatSession) -> String {
    let prompt_meta = format!("[model: {}]", session.model_key());
    format!(
        "\n{}\n{}",
        style_chat_text(&prompt_meta, ChatMessageType::Prompt),
        style_chat_text("> ", ChatMessageType::Prompt)
    )
}
