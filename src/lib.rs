//! HTTP gateway for a medical anamnesis chat.
//!
//! Regular turns are relayed to a chat completion service under a fixed
//! Spanish anamnesis prompt. When the patient writes "recibir resultados",
//! the conversation is summarized, translated with an AI disclaimer, and the
//! English summary is scored by a symptom classifier.

pub mod config;
pub mod conversation;
pub mod error;
pub mod model;
pub mod web;

use std::sync::Arc;

use config::{AppConfig, DEFAULT_MAX_BODY_BYTES};
use conversation::ConversationHandler;
use model::{HttpPredictionClient, OpenAiChatClient, UpstreamError};

// App state structure
pub struct AppState {
    pub conversation: ConversationHandler,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(conversation: ConversationHandler) -> Self {
        Self {
            conversation,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Wires the HTTP-backed collaborators described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        let chat = OpenAiChatClient::new(config)?;
        let predictor = HttpPredictionClient::new(config)?;
        Ok(Self::new(ConversationHandler::new(
            Arc::new(chat),
            Arc::new(predictor),
        ))
        .with_max_body_bytes(config.max_body_bytes))
    }
}
