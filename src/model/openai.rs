use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};

use super::{ChatCompletionClient, ChatCompletionRequest, UpstreamError};
use crate::config::AppConfig;

// A wrapper for an OpenAI-compatible chat completions endpoint
pub struct OpenAiChatClient {
    url: String,
    model: String,
    api_key: Secret<String>,
    client: Client,
}

impl OpenAiChatClient {
    pub fn new(config: &AppConfig) -> Result<Self, UpstreamError> {
        info!("Using chat completion service at: {}", config.openai_url);

        let client = Client::builder().timeout(config.chat_timeout).build()?;

        Ok(Self {
            url: config.openai_url.clone(),
            model: config.model.clone(),
            api_key: Secret::new(config.openai_api_key().to_string()),
            client,
        })
    }
}

#[async_trait]
impl ChatCompletionClient for OpenAiChatClient {
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String, UpstreamError> {
        let payload = json!({
            "model": self.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        debug!(
            "Sending {} messages to chat completion service (max_tokens: {})",
            request.messages.len(),
            request.max_tokens
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or(UpstreamError::MissingContent)?;

        debug!("Chat completion length: {} characters", content.len());
        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{spawn_slow_upstream, spawn_upstream};
    use crate::web::models::Message;
    use std::time::Duration;

    fn client_for(url: String) -> OpenAiChatClient {
        OpenAiChatClient::new(&AppConfig::new("sk-test").with_openai_url(url)).unwrap()
    }

    #[actix_web::test]
    async fn test_sends_bearer_and_payload() {
        let (addr, seen) = spawn_upstream(
            "/v1/chat/completions",
            200,
            json!({ "choices": [{ "message": { "role": "assistant", "content": " Hola \n" } }] }),
        );
        let client = client_for(format!("http://{}/v1/chat/completions", addr));

        let request = ChatCompletionRequest::new(vec![Message::system("sys"), Message::user("hola")])
            .with_max_tokens(250)
            .with_temperature(0.2);
        let content = client.complete(request).await.unwrap();

        // Content is returned untouched; trimming is the caller's decision.
        assert_eq!(content, " Hola \n");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (auth, body) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 250);
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert_eq!(
            body["messages"],
            json!([
                { "role": "system", "content": "sys" },
                { "role": "user", "content": "hola" }
            ])
        );
    }

    #[actix_web::test]
    async fn test_non_success_status_is_an_error() {
        let (addr, _seen) = spawn_upstream(
            "/v1/chat/completions",
            401,
            json!({ "error": { "message": "Incorrect API key" } }),
        );
        let client = client_for(format!("http://{}/v1/chat/completions", addr));

        let err = client
            .complete(ChatCompletionRequest::new(vec![Message::user("hola")]))
            .await
            .unwrap_err();
        match err {
            UpstreamError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Incorrect API key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[actix_web::test]
    async fn test_missing_choices_is_an_error() {
        let (addr, _seen) = spawn_upstream("/v1/chat/completions", 200, json!({ "choices": [] }));
        let client = client_for(format!("http://{}/v1/chat/completions", addr));

        let err = client
            .complete(ChatCompletionRequest::new(vec![Message::user("hola")]))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::MissingContent));
    }

    #[actix_web::test]
    async fn test_unreachable_service_is_an_error() {
        let client = client_for("http://127.0.0.1:1/v1/chat/completions".to_string());
        let err = client
            .complete(ChatCompletionRequest::new(vec![Message::user("hola")]))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Http(_)));
    }

    #[actix_web::test]
    async fn test_slow_service_times_out() {
        let (addr, _seen) = spawn_slow_upstream(
            "/v1/chat/completions",
            Duration::from_secs(5),
            200,
            json!({ "choices": [{ "message": { "content": "tarde" } }] }),
        );
        let mut config = AppConfig::new("sk-test")
            .with_openai_url(format!("http://{}/v1/chat/completions", addr));
        config.chat_timeout = Duration::from_millis(200);
        let client = OpenAiChatClient::new(&config).unwrap();

        let err = client
            .complete(ChatCompletionRequest::new(vec![Message::user("hola")]))
            .await
            .unwrap_err();
        match err {
            UpstreamError::Http(e) => assert!(e.is_timeout(), "{e}"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
