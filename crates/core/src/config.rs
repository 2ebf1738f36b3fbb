use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::PathBuf,
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::{
    assets::{DEFAULT_CONFIG, get_config_dir},
    model::{DEFAULT_MODEL, ModelConfig, ModelProvider},
    reveal::DEFAULT_REVEAL_DELAY,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File system error: {0}")]
    IO(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    YAMLError(#[from] serde_yaml::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RevealConfig {
    /// Pause after each revealed word.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl RevealConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_delay_ms() -> u64 {
    DEFAULT_REVEAL_DELAY.as_millis() as u64
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Directory receiving saved transcripts.
    pub dir: PathBuf,
}

fn default_export_dir() -> String {
    "./Chats".to_string()
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub model: ModelConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub models: HashMap<String, ModelConfig>,
    pub chat: ChatConfig,
    pub reveal: RevealConfig,
    pub export: ExportConfig,
    pub theme: String,
}

fn default_theme() -> String {
    "light".to_string()
}

impl Config {
    /// Resolves a model by key or backend name.
    ///
    /// Unknown names become an Ollama model on the chat model's host, since
    /// any model pulled into the local Ollama can be addressed by name.
    pub fn model_config(&self, name: &str) -> ModelConfig {
        if let Some(model) = self.models.get(name) {
            return model.clone();
        }
        if let Some(model) = self.models.values().find(|m| m.name == name) {
            return model.clone();
        }

        let mut model = ModelConfig::ollama(name);
        if self.chat.model.provider == ModelProvider::Ollama
            && let Some(host) = self.chat.model.settings.get("host")
        {
            model.settings.insert("host".to_string(), host.clone());
        }
        model
    }

    /// Sorted keys of the configured models.
    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.keys().cloned().collect();
        names.sort();
        names
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum StringOrObject<T> {
    String(String),
    Object(T),
}

#[derive(Deserialize, Debug)]
struct RawConfig {
    #[serde(default)]
    models: HashMap<String, ModelConfig>,
    #[serde(default)]
    chat: Option<RawChatConfig>,
    #[serde(default)]
    reveal: RevealConfig,
    #[serde(default)]
    export: Option<RawExportConfig>,
    theme: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawChatConfig {
    model: StringOrObject<ModelConfig>,
}

#[derive(Deserialize, Debug)]
struct RawExportConfig {
    #[serde(default = "default_export_dir")]
    dir: String,
}

impl RawConfig {
    #[instrument]
    fn to_config(&self) -> Result<Config, ConfigError> {
        let mut models_with_names = HashMap::new();
        for (k, v) in &self.models {
            let model_name = if v.name.is_empty() {
                k.clone()
            } else {
                v.name.clone()
            };
            let model = ModelConfig {
                key: k.clone(),
                name: model_name,
                ..v.clone()
            };
            models_with_names.insert(k.clone(), model);
        }

        let chat_model = match &self.chat {
            Some(RawChatConfig {
                model: StringOrObject::String(s),
            }) => models_with_names
                .get(s)
                .cloned()
                .ok_or_else(|| ConfigError::Config(format!("Model '{s}' not found")))?,
            Some(RawChatConfig {
                model: StringOrObject::Object(m),
            }) => m.clone(),
            None => models_with_names
                .get(DEFAULT_MODEL)
                .cloned()
                .unwrap_or_else(|| ModelConfig::ollama(DEFAULT_MODEL)),
        };
        if chat_model.name.is_empty() {
            return Err(ConfigError::Config(
                "Inline chat model requires a name".to_string(),
            ));
        }

        let export_dir = self
            .export
            .as_ref()
            .map(|e| e.dir.clone())
            .unwrap_or_else(default_export_dir);
        let export_dir = shellexpand::full(&export_dir)
            .map_err(|e| ConfigError::Config(format!("Invalid export directory: {e}")))?;

        Ok(Config {
            models: models_with_names,
            chat: ChatConfig { model: chat_model },
            reveal: self.reveal.clone(),
            export: ExportConfig {
                dir: PathBuf::from(export_dir.as_ref()),
            },
            theme: self.theme.clone().unwrap_or_else(default_theme),
        })
    }
}

#[instrument(skip(config_path))]
pub fn create_or_get_config_file(
    config_path: Option<PathBuf>,
) -> Result<(bool, PathBuf), ConfigError> {
    let actual_path = config_path.unwrap_or_else(|| get_config_dir().join("ochat.yml"));

    let parent_dir = actual_path.parent().ok_or_else(|| {
        ConfigError::IO(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Config path has no parent directory",
        ))
    })?;

    if !parent_dir.exists() {
        fs::create_dir_all(parent_dir)?;
    }

    if actual_path.exists() {
        Ok((true, actual_path))
    } else {
        File::create(&actual_path)?.write_all(DEFAULT_CONFIG.as_bytes())?;
        Ok((false, actual_path))
    }
}

#[instrument(skip(config_path))]
pub fn get_config(config_path: Option<PathBuf>) -> Result<Config, ConfigError> {
    let (_, config_file) = create_or_get_config_file(config_path)?;
    let content = fs::read_to_string(&config_file)?;
    let raw: RawConfig = serde_yaml::from_str(&content)?;
    raw.to_config()
}
