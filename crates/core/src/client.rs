//! Single-message adapter over a completion model.
//!
//! [`ask`] never fails: backend errors come back as readable text that the
//! caller stores and shows like any other assistant reply.
use crate::completion::{ChatMessage, CompletionError, CompletionModel};
use tracing::{info, instrument};

/// Sends `message` alone (no earlier turns) to `model` and returns its reply.
#[instrument(skip(model, message), fields(model = model.name()))]
pub async fn ask(model: &dyn CompletionModel, message: &str) -> String {
    let messages = [ChatMessage::user(message)];
    match model.complete(&messages).await {
        Ok(reply) => reply,
        Err(err) => {
            info!(error = %err, "Completion failed");
            describe_error(model.name(), &err)
        }
    }
}

/// Renders a completion error as the text shown in place of a reply.
pub fn describe_error(model: &str, err: &CompletionError) -> String {
    match err {
        CompletionError::ModelNotFound(_) => {
            format!("Model '{model}' not found. Please ensure it is available locally.")
        }
        CompletionError::Backend(text) => format!("An unexpected error occurred: {text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelConfig, ModelProvider};
    use crate::provider::test_provider::TestProviderModel;
    use std::collections::HashMap;

    fn test_model(name: &str, response_mode: &str) -> TestProviderModel {
        TestProviderModel::new(ModelConfig {
            key: String::new(),
            name: name.to_string(),
            provider: ModelProvider::Test,
            settings: HashMap::from([("response_mode".to_string(), response_mode.into())]),
        })
    }

    #[tokio::test]
    async fn test_ask_returns_reply_verbatim() {
        let model = test_model("mock", "echo");
        assert_eq!(ask(&model, "  spaced\ttext \n").await, "  spaced\ttext \n");
    }

    #[tokio::test]
    async fn test_ask_model_not_found() {
        let model = test_model("nonexistent-model", "not_found");
        let reply = ask(&model, "hello").await;
        assert_eq!(
            reply,
            "Model 'nonexistent-model' not found. Please ensure it is available locally."
        );
    }

    #[tokio::test]
    async fn test_ask_unexpected_error() {
        let model = test_model("mock", "error");
        let reply = ask(&model, "hello").await;
        assert_eq!(reply, "An unexpected error occurred: TestProviderModel error");
    }
}
