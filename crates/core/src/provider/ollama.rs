use crate::completion::{ChatMessage, CompletionError, CompletionModel};
use crate::model::{ModelConfig, ModelInitError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

fn default_host() -> String {
    DEFAULT_OLLAMA_HOST.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaSettings {
    #[serde(default = "default_host")]
    host: String,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

/// Chat model served by an Ollama instance over its HTTP API.
pub struct OllamaBaseModel {
    config: ModelConfig,
    client: Client,
    host: String,
}

impl OllamaBaseModel {
    pub fn new(model_config: ModelConfig) -> Result<Self, ModelInitError> {
        let settings: OllamaSettings = serde_yaml::to_value(&model_config.settings)
            .and_then(serde_yaml::from_value)
            .map_err(|e| ModelInitError::InvalidSettings(e.to_string()))?;

        let client = Client::builder().build()?;

        Ok(Self {
            config: model_config,
            client,
            host: settings.host.trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

/// Maps a failed Ollama response to a completion error.
///
/// Ollama answers an unknown model with 404 and a body like
/// `{"error": "model \"x\" not found, try pulling it first"}`.
fn classify_error(model: &str, status: StatusCode, message: &str) -> CompletionError {
    if status == StatusCode::NOT_FOUND || message.to_lowercase().contains("not found") {
        CompletionError::ModelNotFound(model.to_string())
    } else {
        CompletionError::Backend(format!("{message} (status code: {})", status.as_u16()))
    }
}

/// Joins an error with its sources, e.g. `error sending request: ... : Connection refused`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

#[async_trait]
impl CompletionModel for OllamaBaseModel {
    fn name(&self) -> &str {
        &self.config.name
    }

    #[instrument(skip(self, messages), fields(model = %self.config.name))]
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let request = OllamaChatRequest {
            model: &self.config.name,
            messages: messages
                .iter()
                .map(|m| OllamaMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
        };

        let url = format!("{}/api/chat", self.host);
        debug!(url = %url, messages = messages.len(), "Sending chat request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Backend(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<OllamaErrorResponse>(&body) {
                Ok(err) => err.error,
                Err(_) if body.trim().is_empty() => status.to_string(),
                Err(_) => body,
            };
            warn!(status = status.as_u16(), error = %message, "Ollama request failed");
            return Err(classify_error(&self.config.name, status, &message));
        }

        let reply: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Backend(format!("Invalid response from Ollama: {e}")))?;
        debug!(chars = reply.message.content.len(), "Received chat response");

        Ok(reply.message.content)
    }
}
