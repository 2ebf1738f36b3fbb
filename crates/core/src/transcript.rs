//! Session-scoped, append-only log of chat messages.
use crate::completion::{ChatMessage, Role};

/// Ordered messages of one chat session. Insertion order is display order.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, content: &str) {
        self.messages.push(ChatMessage::new(role, content));
    }

    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
        assert!(transcript.all().is_empty());
    }

    #[test]
    fn test_append_preserves_call_order() {
        let mut transcript = Transcript::new();
        let turns = [
            (Role::User, "one"),
            (Role::Assistant, "two"),
            (Role::User, "three"),
            (Role::User, "four"),
            (Role::Assistant, "five"),
        ];
        for (role, content) in turns {
            transcript.append(role, content);
        }

        assert_eq!(transcript.len(), turns.len());
        for (msg, (role, content)) in transcript.all().iter().zip(turns) {
            assert_eq!(msg.role, role);
            assert_eq!(msg.content, content);
        }
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "same");
        transcript.append(Role::User, "same");
        assert_eq!(transcript.len(), 2);
    }
}
