use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Model used when neither the command line nor the config names one.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Model configuration for the tool.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ModelConfig {
    /// Key of the entry in the `models` map, empty for inline models.
    #[serde(skip)]
    pub key: String,
    /// Model identifier sent to the backend.
    #[serde(default)]
    pub name: String,
    #[serde(alias = "type")]
    pub provider: ModelProvider,
    #[serde(default, flatten)]
    pub settings: HashMap<String, serde_yaml::Value>,
}

impl ModelConfig {
    /// Creates an Ollama model with the given name and no extra settings.
    pub fn ollama(name: &str) -> Self {
        Self {
            key: String::new(),
            name: name.to_string(),
            provider: ModelProvider::Ollama,
            settings: HashMap::new(),
        }
    }

    /// Reads a provider setting, returning `None` when absent or of another type.
    pub fn get_setting<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.settings
            .get(key)
            .and_then(|v| serde_yaml::from_value(v.clone()).ok())
    }
}

/// Supported model provider integrations (serialized as lowercase strings).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    Ollama,
    Test,
}

impl ModelProvider {
    pub fn as_str(&self) -> &'static str {
        match &self {
            ModelProvider::Ollama => "ollama",
            ModelProvider::Test => "test",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ModelInitError {
    #[error("Invalid model settings: {0}")]
    InvalidSettings(String),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
