//! Test utilities for ochat-core
//!
//! Common helpers for creating temporary config files and mock models.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::Builder;

use crate::model::{ModelConfig, ModelProvider};

/// Creates a temporary config file with the given content.
/// Uses tempfile::Builder to ensure unique directories for parallel tests.
///
/// # Panics
/// Panics if temp directory creation or file writing fails.
pub fn create_temp_config(content: &str) -> PathBuf {
    let temp_dir = Builder::new()
        .prefix("ochat-test")
        .rand_bytes(8)
        .tempdir()
        .unwrap();
    let config_path = temp_dir.path().join("ochat.yml");
    File::create(&config_path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
    // Keep the temp directory alive by leaking it (this is just for tests)
    let _ = Box::leak(Box::new(temp_dir));
    config_path
}

/// A test-provider model answering according to `response_mode`.
pub fn test_model_config(name: &str, response_mode: &str) -> ModelConfig {
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
