//! A mock completion provider for unit testing purposes.
use crate::completion::{ChatMessage, CompletionError, CompletionModel};
use crate::model::ModelConfig;
use async_trait::async_trait;

/// A mock `CompletionModel` for use in tests.
///
/// The `response_mode` setting controls what kind of reply it generates:
/// - `""` (default): a fixed "Hello world" reply.
/// - `"echo"`: the content of the last message, unchanged.
/// - `"not_found"`: a model-not-found error.
/// - `"error"`: a generic backend error.
#[derive(Debug)]
pub struct TestProviderModel {
    config: ModelConfig,
}

impl TestProviderModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CompletionModel for TestProviderModel {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let response_mode: String = self.config.get_setting("response_mode").unwrap_or_default();

        match response_mode.as_str() {
            "echo" => Ok(messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default()),
            "not_found" => Err(CompletionError::ModelNotFound(self.config.name.clone())),
            "error" => Err(CompletionError::Backend(
                "TestProviderModel error".to_string(),
            )),
            _ => Ok("Hello world".to_string()),
        }
    }
}
