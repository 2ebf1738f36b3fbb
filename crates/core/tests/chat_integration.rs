//! End-to-end turns against a mock Ollama server.
use ochat_core::{
    client::ask,
    completion::Role,
    config::get_config,
    export::{SaveOutcome, format_transcript, save_to_disk},
    get_completion_llm,
    model::ModelConfig,
    session::ChatSession,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

fn write_config(dir: &TempDir, server_uri: &str) -> PathBuf {
    let config_path = dir.path().join("ochat.yml");
    let content = format!(
        r#"
models:
  local:
    name: llama3.2
    type: ollama
    host: "{server_uri}"
chat:
  model: local
reveal:
  delay_ms: 0
export:
  dir: "{}"
"#,
        dir.path().join("Chats").display()
    );
    fs::write(&config_path, content).unwrap();
    config_path
}

#[tokio::test]
async fn test_chat_turns_and_save() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "llama3.2",
            "messages": [{"role": "user", "content": "Hi"}],
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"role": "assistant", "content": "Hello!\nNice to meet you."},
            "done": true
        })))
        .mount(&server)
        .await;
    // Only the current message is sent, never the earlier turn.
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "messages": [{"role": "user", "content": "Bye"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"role": "assistant", "content": "Goodbye."},
            "done": true
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = get_config(Some(write_config(&dir, &server.uri()))).unwrap();
    let mut session = ChatSession::from_config(&config, None).unwrap();

    let mut chunks: Vec<String> = Vec::new();
    session.submit("Hi", &mut chunks).await.unwrap();
    session.submit("Bye", &mut chunks).await.unwrap();

    assert_eq!(
        chunks,
        vec!["Hello! ", "\n", "Nice ", "to ", "meet ", "you. ", "\n", "Goodbye. ", "\n"]
    );
    assert_eq!(
        format_transcript(session.transcript()),
        "user: Hi\nassistant: Hello!\nNice to meet you.\nuser: Bye\nassistant: Goodbye."
    );

    let outcome = save_to_disk(session.transcript(), &config.export.dir).unwrap();
    let SaveOutcome::Saved(saved) = outcome else {
        panic!("transcript should have been saved");
    };
    let saved_lines: Vec<String> = fs::read_to_string(saved)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(saved_lines[0], "user: Hi");
    assert_eq!(saved_lines.last().map(String::as_str), Some("assistant: Goodbye."));
}

#[tokio::test]
async fn test_ask_unknown_model_names_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "model \"nonexistent-model\" not found, try pulling it first"
        })))
        .mount(&server)
        .await;

    let mut model_config = ModelConfig::ollama("nonexistent-model");
    model_config
        .settings
        .insert("host".to_string(), server.uri().into());
    let model = get_completion_llm(model_config).unwrap();

    let reply = ask(model.as_ref(), "hello").await;

    assert!(reply.contains("nonexistent-model"));
    assert!(reply.contains("not found"));
}

#[tokio::test]
async fn test_unreachable_backend_becomes_reply_text() {
    // Nothing listens on the discard port.
    let dir = tempfile::tempdir().unwrap();
    let config = get_config(Some(write_config(&dir, "http://127.0.0.1:9"))).unwrap();
    let mut session = ChatSession::from_config(&config, None).unwrap();

    let mut chunks: Vec<String> = Vec::new();
    let reply = session.submit("Hi", &mut chunks).await.unwrap().unwrap();

    assert!(reply.starts_with("An unexpected error occurred: "));
    assert_eq!(session.transcript().all()[1].role, Role::Assistant);
    assert_eq!(session.transcript().all()[1].content, reply);
}

#[test]
fn test_save_empty_session_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = get_config(Some(write_config(&dir, "http://127.0.0.1:9"))).unwrap();
    let session = ChatSession::from_config(&config, None).unwrap();

    let outcome = save_to_disk(session.transcript(), &config.export.dir).unwrap();

    assert_eq!(outcome, SaveOutcome::Empty);
    assert!(!config.export.dir.exists());
}
