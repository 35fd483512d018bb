//! Outbound collaborators: the chat completion service and the symptom
//! prediction service, each behind a narrow async trait.

pub mod mock;
mod openai;
mod prediction;

pub use mock::{MockChatClient, MockPredictionClient};
pub use openai::OpenAiChatClient;
pub use prediction::HttpPredictionClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::conversation::prompts::{CHAT_MAX_TOKENS, CHAT_TEMPERATURE};
use crate::web::models::Message;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to extract content from response")]
    MissingContent,

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Sampling parameters and messages for one chat completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatCompletionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            max_tokens: CHAT_MAX_TOKENS,
            temperature: CHAT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Returns the content of the first choice, as sent by the service.
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String, UpstreamError>;
}

#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Returns the service's `predictions` array, empty when the field is absent.
    async fn predict(&self, text: &str) -> Result<Vec<Value>, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_to_chat_sampling() {
        let request = ChatCompletionRequest::new(vec![Message::user("hola")]);
        assert_eq!(request.max_tokens, CHAT_MAX_TOKENS);
        assert_eq!(request.temperature, CHAT_TEMPERATURE);
    }
}
