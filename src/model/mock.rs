//! Scripted collaborators for tests and local runs without network access.
//!
//! Responses are consumed in order; every call is recorded for verification.
//!
//! ```ignore
//! let chat = MockChatClient::new().with_response("Hola, ¿qué síntomas tiene?");
//! let reply = chat.complete(request).await?;
//! assert_eq!(chat.calls().len(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{ChatCompletionClient, ChatCompletionRequest, PredictionClient, UpstreamError};

enum Scripted<T> {
    Ok(T),
    Err(UpstreamError),
}

#[derive(Clone, Default)]
pub struct MockChatClient {
    responses: Arc<Mutex<VecDeque<Scripted<String>>>>,
    calls: Arc<Mutex<Vec<ChatCompletionRequest>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(Scripted::Ok(content.into()));
        self
    }

    pub fn with_error(self, error: UpstreamError) -> Self {
        self.push(Scripted::Err(error));
        self
    }

    pub fn calls(&self) -> Vec<ChatCompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, response: Scripted<String>) {
        self.responses.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl ChatCompletionClient for MockChatClient {
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String, UpstreamError> {
        self.calls.lock().unwrap().push(request);
        match self.responses.lock().unwrap().pop_front() {
            Some(Scripted::Ok(content)) => Ok(content),
            Some(Scripted::Err(err)) => Err(err),
            None => Err(UpstreamError::MissingContent),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockPredictionClient {
    responses: Arc<Mutex<VecDeque<Scripted<Vec<Value>>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPredictionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_predictions(self, predictions: Vec<Value>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Ok(predictions));
        self
    }

    pub fn with_error(self, error: UpstreamError) -> Self {
        self.responses.lock().unwrap().push_back(Scripted::Err(error));
        self
    }

    /// Texts submitted for classification, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionClient for MockPredictionClient {
    async fn predict(&self, text: &str) -> Result<Vec<Value>, UpstreamError> {
        self.calls.lock().unwrap().push(text.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(Scripted::Ok(predictions)) => Ok(predictions),
            Some(Scripted::Err(err)) => Err(err),
            None => Ok(Vec::new()),
        }
    }
}
