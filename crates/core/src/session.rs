//! A chat session: one transcript, one model and the turn loop between them.
use crate::{
    client::ask,
    completion::{CompletionModel, Role},
    config::Config,
    model::ModelConfig,
    reveal::{ChunkSink, drive},
    transcript::Transcript,
};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, instrument};

/// Where a session is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Processing,
}

/// Owns the transcript for one interactive session and runs its turns.
///
/// Only one turn is in flight at a time: [`ChatSession::submit`] holds the
/// session mutably until the reply has been stored and revealed.
pub struct ChatSession {
    model: Box<dyn CompletionModel>,
    model_key: String,
    transcript: Transcript,
    reveal_delay: Duration,
    state: SessionState,
}

impl ChatSession {
    pub fn new(model: Box<dyn CompletionModel>, reveal_delay: Duration) -> Self {
        let model_key = model.name().to_string();
        Self {
            model,
            model_key,
            transcript: Transcript::new(),
            reveal_delay,
            state: SessionState::AwaitingInput,
        }
    }

    /// Creates a session for `model` (a config key or model name), or for
    /// the configured chat model when `None`.
    pub fn from_config(config: &Config, model: Option<&str>) -> Result<Self> {
        let model_config = match model {
            Some(name) => config.model_config(name),
            None => config.chat.model.clone(),
        };
        let mut session = Self::new(
            Self::load_model(model_config.clone())?,
            config.reveal.delay(),
        );
        session.model_key = display_key(&model_config);
        Ok(session)
    }

    fn load_model(model_config: ModelConfig) -> Result<Box<dyn CompletionModel>> {
        let name = model_config.name.clone();
        crate::get_completion_llm(model_config)
            .with_context(|| format!("Failed to initialize model '{name}'"))
    }

    /// Switches the model used for later turns. The transcript is kept.
    pub fn set_model(&mut self, model_config: ModelConfig) -> Result<()> {
        let key = display_key(&model_config);
        self.model = Self::load_model(model_config)?;
        self.model_key = key;
        debug!(model = %self.model_key, "Switched model");
        Ok(())
    }

    pub fn model_key(&self) -> &str {
        &self.model_key
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs one turn for `input` and returns the stored reply.
    ///
    /// Blank input is ignored and returns `Ok(None)`. Otherwise the user
    /// message and the reply are appended, then the reply is revealed into
    /// `sink`. Backend failures arrive as reply text, so errors here come
    /// only from the sink.
    #[instrument(skip(self, input, sink), fields(model = %self.model_key))]
    pub async fn submit(&mut self, input: &str, sink: &mut dyn ChunkSink) -> Result<Option<String>> {
        if !self.begin_turn(input) {
            return Ok(None);
        }

        let reply = ask(self.model.as_ref(), input).await;
        self.transcript.append(Role::Assistant, &reply);
        debug!(messages = self.transcript.len(), "Turn stored");

        let revealed = drive(&reply, self.reveal_delay, sink).await;
        self.end_turn();
        revealed?;

        Ok(Some(reply))
    }

    /// Moves to `Processing` and records `input`. Blank input changes nothing.
    fn begin_turn(&mut self, input: &str) -> bool {
        if input.trim().is_empty() {
            return false;
        }
        self.state = SessionState::Processing;
        self.transcript.append(Role::User, input);
        true
    }

    fn end_turn(&mut self) {
        self.state = SessionState::AwaitingInput;
    }
}

fn display_key(model_config: &ModelConfig) -> String {
    if model_config.key.is_empty() {
        model_config.name.clone()
    } else {
        model_config.key.clone()
    }
}
