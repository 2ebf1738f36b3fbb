#![cfg(test)]

//! Test utilities for chat modules

use anyhow::Result;
use ochat_core::config::{ChatConfig, Config, ExportConfig, RevealConfig};
use ochat_core::model::{ModelConfig, ModelProvider};
use ochat_core::session::ChatSession;
use std::collections::HashMap;
use tempfile::TempDir;

fn test_model(name: &str, response_mode: &str) -> ModelConfig {
    ModelConfig {
        key: name.to_string(),
        name: name.to_string(),
        provider: ModelProvider::Test,
        settings: HashMap::from([(
            "response_mode".to_string(),
            serde_yaml::Value::String(response_mode.to_string()),
        )]),
    }
}

/// Creates a config with two test models and an export directory inside a
/// fresh temp dir. The directory is removed when the returned guard drops.
///
/// `test-model-1` always replies "Hello world", `test-model-2` echoes.
pub fn create_test_config() -> Result<(Config, TempDir)> {
    let dir = tempfile::tempdir()?;
    let models = HashMap::from([
        ("test-model-1".to_string(), test_model("test-model-1", "")),
        ("test-model-2".to_string(), test_model("test-model-2", "echo")),
    ]);

    let config = Config {
        models,
        chat: ChatConfig {
            model: test_model("test-model-1", ""),
        },
        reveal: RevealConfig { delay_ms: 0 },
        export: ExportConfig {
            dir: dir.path().join("Chats"),
        },
        theme: "light".to_string(),
    };
    Ok((config, dir))
}

/// A session on the configured chat model.
pub fn create_test_session(config: &Config) -> Result<ChatSession> {
    ChatSession::from_config(config, None)
}
