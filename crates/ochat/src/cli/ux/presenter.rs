use console::{Style, StyledObject};
use ochat_core::export::{ExportError, SaveOutcome};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMessageType {
    Prompt,
    Footer,
    Success,
    Warning,
    Error,
}

pub fn style_chat_text(text: &str, style: ChatMessageType) -> StyledObject<&str> {
    let style_obj = match style {
        ChatMessageType::Prompt => Style::new().blue().bold(),
        ChatMessageType::Footer => Style::new().white().dim(),
        ChatMessageType::Success => Style::new().green(),
        ChatMessageType::Warning => Style::new().yellow(),
        ChatMessageType::Error => Style::new().red().bold(),
    };
    style_obj.apply_to(text)
}

/// Footer line printed after a revealed reply.
pub fn format_footer(elapsed: Duration) -> String {
    let footer = format!("◼ Completed. {:.2}s total.", elapsed.as_secs_f32());
    style_chat_text(&footer, ChatMessageType::Footer).to_string()
}

/// Describes the result of saving a transcript to disk.
pub fn describe_save(result: &Result<SaveOutcome, ExportError>) -> (ChatMessageType, String) {
    match result {
        Ok(SaveOutcome::Saved(path)) => (
            ChatMessageType::Success,
            format!("Chat saved to {}", path.display()),
        ),
        Ok(SaveOutcome::Empty) => (
            ChatMessageType::Warning,
            "No chat messages to save.".to_string(),
        ),
        Err(e) => (ChatMessageType::Error, format!("Failed to save chat: {e}")),
    }
}

/// Prints the result of saving a transcript. Errors go to stderr.
pub fn present_save(result: &Result<SaveOutcome, ExportError>) {
    let (kind, text) = describe_save(result);
    let styled = style_chat_text(&text, kind);
    match kind {
        ChatMessageType::Error => eprintln!("{styled}"),
        _ => println!("{styled}"),
    }
}
