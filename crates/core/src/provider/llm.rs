use crate::completion::CompletionModel;
use crate::model::{ModelConfig, ModelProvider};
use crate::provider::{ollama, test_provider};
use anyhow::Result;
use tracing::instrument;

#[instrument(
    skip(model_config),
    fields(model = %model_config.name, provider = model_config.provider.as_str())
)]
pub fn get_completion_llm(model_config: ModelConfig) -> Result<Box<dyn CompletionModel>> {
    match model_config.provider {
        ModelProvider::Ollama => {
            let model = ollama::OllamaBaseModel::new(model_config)?;
            Ok(Box::new(model))
        }
        ModelProvider::Test => Ok(Box::new(test_provider::TestProviderModel::new(
            model_config,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::ChatMessage;
    use std::collections::HashMap;

    #[test]
    fn test_get_completion_llm_ollama_provider() {
        let mut settings = HashMap::new();
        settings.insert("host".to_string(), "http://localhost:1234".into());
        let model_config = ModelConfig {
            key: "local".to_string(),
            name: "llama3.2".to_string(),
            provider: ModelProvider::Ollama,
            settings,
        };
        let model = get_completion_llm(model_config).unwrap();
        assert_eq!(model.name(), "llama3.2");
    }

    #[test]
    fn test_get_completion_llm_ollama_invalid_host_type() {
        let mut settings = HashMap::new();
        settings.insert(
            "host".to_string(),
            serde_yaml::Value::Sequence(vec!["a".into()]),
        );
        let model_config = ModelConfig {
            key: String::new(),
            name: "llama3.2".to_string(),
            provider: ModelProvider::Ollama,
            settings,
        };
        let err = get_completion_llm(model_config).err().unwrap();
        assert!(err.to_string().contains("Invalid model settings"));
    }

    #[tokio::test]
    async fn test_get_completion_llm_test_provider() {
        let model_config = ModelConfig {
            key: String::new(),
            name: "mock".to_string(),
            provider: ModelProvider::Test,
            settings: HashMap::from([("response_mode".to_string(), "echo".into())]),
        };
        let model = get_completion_llm(model_config).unwrap();
        let reply = model.complete(&[ChatMessage::user("ping")]).await.unwrap();
        assert_eq!(reply, "ping");
    }
}
