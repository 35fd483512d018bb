use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use super::{PredictionClient, UpstreamError};
use crate::config::AppConfig;

/// Client for the symptom classifier. The service is unauthenticated.
pub struct HttpPredictionClient {
    url: String,
    client: Client,
}

impl HttpPredictionClient {
    pub fn new(config: &AppConfig) -> Result<Self, UpstreamError> {
        info!("Using prediction service at: {}", config.predict_url);

        let client = Client::builder().timeout(config.predict_timeout).build()?;

        Ok(Self {
            url: config.predict_url.clone(),
            client,
        })
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, text: &str) -> Result<Vec<Value>, UpstreamError> {
        debug!("Requesting predictions for {} characters of text", text.len());

        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "text": text }))
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

        match response_json.get("predictions") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(predictions)) => Ok(predictions.clone()),
            Some(other) => Err(UpstreamError::Decode(format!(
                "expected 'predictions' to be an array, got {}",
                other
            ))),
        }
    }
}
