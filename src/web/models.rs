use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// JSON body returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandlerResponse {
    Results {
        mode: ResultsMode,
        symptoms_text: String,
        predictions: Vec<Value>,
        turns: usize,
    },
    Chat {
        mode: ChatMode,
        answer: String,
    },
    Error {
        error: String,
    },
}

impl HandlerResponse {
    pub fn results(symptoms_text: String, predictions: Vec<Value>, turns: usize) -> Self {
        Self::Results {
            mode: ResultsMode::Results,
            symptoms_text,
            predictions,
            turns,
        }
    }

    pub fn chat(answer: String) -> Self {
        Self::Chat {
            mode: ChatMode::Chat,
            answer,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

// Single-variant markers so the untagged union serializes `"mode": "results"`
// and `"mode": "chat"` and only accepts those literals when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultsMode {
    #[serde(rename = "results")]
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatMode {
    #[serde(rename = "chat")]
    Chat,
}
