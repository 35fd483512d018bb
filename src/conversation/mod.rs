//! The anamnesis conversation handler.
//!
//! One call to [`ConversationHandler::handle`] serves one inbound request:
//! a CORS preflight, a regular chat turn (one chat completion call) or, when
//! the patient writes the trigger phrase, the results flow (symptom
//! extraction, translation, then classification). Errors never escape
//! `handle`; they become a JSON `{"error": ...}` body.

pub mod prompts;
pub mod transcript;

use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use log::{error, info};
use serde_json::Value;
use uuid::Uuid;

use crate::error::HandlerError;
use crate::model::{ChatCompletionClient, ChatCompletionRequest, PredictionClient};
use crate::web::models::{HandlerResponse, Message};

use prompts::{
    CHAT_MAX_TOKENS, CHAT_SYSTEM_PROMPT_ES, CHAT_TEMPERATURE, EXTRACTOR_SYSTEM_PROMPT,
    RESULTS_MAX_TOKENS, RESULTS_TEMPERATURE, TRANSCRIPT_HEADER, TRANSLATOR_SYSTEM_PROMPT,
};

pub const EMPTY_MESSAGES_ERROR: &str = "Debes enviar 'messages' como lista no vacía";

/// Headers attached to every response, preflight included.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "content-type,authorization"),
    ("Access-Control-Allow-Methods", "POST,OPTIONS"),
];

#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub body: Vec<u8>,
}

impl InboundRequest {
    pub fn new(method: Method, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundResponse {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

impl OutboundResponse {
    fn preflight() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            headers: CORS_HEADERS.to_vec(),
            body: String::new(),
        }
    }

    fn json(status: StatusCode, payload: &HandlerResponse) -> Self {
        let mut headers = vec![("Content-Type", "application/json")];
        headers.extend(CORS_HEADERS);
        let body = serde_json::to_string(payload)
            .unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e));
        Self {
            status,
            headers,
            body,
        }
    }
}

pub struct ConversationHandler {
    chat: Arc<dyn ChatCompletionClient>,
    predictor: Arc<dyn PredictionClient>,
}

impl ConversationHandler {
    pub fn new(chat: Arc<dyn ChatCompletionClient>, predictor: Arc<dyn PredictionClient>) -> Self {
        Self { chat, predictor }
    }

    pub async fn handle(&self, request: InboundRequest) -> OutboundResponse {
        if request.method == Method::OPTIONS {
            return OutboundResponse::preflight();
        }

        let request_id = Uuid::new_v4();
        match self.process(&request.body, request_id).await {
            Ok(payload) => OutboundResponse::json(StatusCode::OK, &payload),
            Err(err) => fail(err, request_id),
        }
    }

    /// Answers a request whose body could not be read, with the same JSON
    /// error shape and headers as any other failure.
    pub fn reject(&self, err: HandlerError) -> OutboundResponse {
        fail(err, Uuid::new_v4())
    }

    async fn process(&self, body: &[u8], request_id: Uuid) -> Result<HandlerResponse, HandlerError> {
        let messages = parse_messages(body)?;

        if transcript::requests_results(&messages) {
            info!("Request {}: results requested after {} turns", request_id, messages.len());
            self.results(&messages).await
        } else {
            info!("Request {}: chat turn {}", request_id, messages.len());
            self.chat_turn(messages).await
        }
    }

    async fn results(&self, messages: &[Message]) -> Result<HandlerResponse, HandlerError> {
        let full_transcript = transcript::render(messages);

        let symptoms = self
            .chat
            .complete(results_request(
                EXTRACTOR_SYSTEM_PROMPT,
                format!("{}{}", TRANSCRIPT_HEADER, full_transcript),
            ))
            .await?
            .trim()
            .to_string();

        let symptoms_es = self
            .chat
            .complete(results_request(
                TRANSLATOR_SYSTEM_PROMPT,
                format!("{}{}", TRANSCRIPT_HEADER, symptoms),
            ))
            .await?
            .trim()
            .to_string();

        // The classifier is trained on English text.
        let predictions = self.predictor.predict(&symptoms).await?;

        Ok(HandlerResponse::results(
            symptoms_es,
            predictions,
            messages.len(),
        ))
    }

    async fn chat_turn(&self, messages: Vec<Message>) -> Result<HandlerResponse, HandlerError> {
        let mut chat_messages = Vec::with_capacity(messages.len() + 1);
        chat_messages.push(Message::system(CHAT_SYSTEM_PROMPT_ES));
        chat_messages.extend(messages);

        let request = ChatCompletionRequest::new(chat_messages)
            .with_max_tokens(CHAT_MAX_TOKENS)
            .with_temperature(CHAT_TEMPERATURE);
        let answer = self.chat.complete(request).await?;

        Ok(HandlerResponse::chat(answer))
    }
}

fn fail(err: HandlerError, request_id: Uuid) -> OutboundResponse {
    match err {
        HandlerError::Validation(_) => info!("Rejected request {}: {}", request_id, err),
        _ => error!("Error: {}", err),
    }
    OutboundResponse::json(err.status(), &HandlerResponse::error(err.to_string()))
}

fn results_request(system_prompt: &str, user_turn: String) -> ChatCompletionRequest {
    ChatCompletionRequest::new(vec![Message::system(system_prompt), Message::user(user_turn)])
        .with_max_tokens(RESULTS_MAX_TOKENS)
        .with_temperature(RESULTS_TEMPERATURE)
}

/// Extracts a non-empty `messages` list. An empty body reads as `{}`.
fn parse_messages(body: &[u8]) -> Result<Vec<Message>, HandlerError> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(body)?
    };

    let raw = value
        .get("messages")
        .and_then(Value::as_array)
        .filter(|messages| !messages.is_empty())
        .ok_or_else(|| HandlerError::Validation(EMPTY_MESSAGES_ERROR.to_string()))?;

    raw.iter()
        .enumerate()
        .map(|(i, message)| {
            serde_json::from_value(message.clone()).map_err(|e| {
                HandlerError::Validation(format!("Mensaje {} inválido en 'messages': {}", i, e))
            })
        })
        .collect()
}
