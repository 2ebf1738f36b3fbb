pub mod llm;
pub mod ollama;
pub mod test_provider;
