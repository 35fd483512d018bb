use std::env;
use std::time::Duration;

use log::info;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_PREDICT_URL: &str = "http://localhost:8000/predict";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Largest accepted request body, matching the Lambda request size limit.
pub const DEFAULT_MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required configuration missing: {0}")]
    MissingSecret(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Process-wide configuration, read once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    openai_api_key: Secret<String>,
    pub openai_url: String,
    pub model: String,
    pub predict_url: String,
    pub chat_timeout: Duration,
    pub predict_timeout: Duration,
    pub max_body_bytes: usize,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Builds a configuration with the given API key and default endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            openai_api_key: Secret::new(api_key.into()),
            openai_url: DEFAULT_OPENAI_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            predict_url: DEFAULT_PREDICT_URL.to_string(),
            chat_timeout: Duration::from_secs(30),
            predict_timeout: Duration::from_secs(20),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// `OPENAI_API_KEY` is required; every other variable falls back to a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingSecret("OPENAI_API_KEY"))?;

        let mut config = Self::new(api_key);

        if let Some(url) = lookup("OPENAI_URL") {
            config.openai_url = url;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            config.model = model;
        }
        if let Some(url) = lookup("PREDICT_URL") {
            config.predict_url = url;
        }
        if let Some(secs) = lookup("CHAT_TIMEOUT_SECS") {
            config.chat_timeout = Duration::from_secs(parse("CHAT_TIMEOUT_SECS", secs)?);
        }
        if let Some(secs) = lookup("PREDICT_TIMEOUT_SECS") {
            config.predict_timeout = Duration::from_secs(parse("PREDICT_TIMEOUT_SECS", secs)?);
        }
        if let Some(bytes) = lookup("MAX_BODY_BYTES") {
            config.max_body_bytes = parse("MAX_BODY_BYTES", bytes)?;
        }
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse("PORT", port)?;
        }

        info!(
            "Configuration loaded: model={}, chat endpoint={}, predict endpoint={}",
            config.model, config.openai_url, config.predict_url
        );

        Ok(config)
    }

    pub fn with_openai_url(mut self, url: impl Into<String>) -> Self {
        self.openai_url = url.into();
        self
    }

    pub fn with_predict_url(mut self, url: impl Into<String>) -> Self {
        self.predict_url = url.into();
        self
    }

    pub(crate) fn openai_api_key(&self) -> &str {
        self.openai_api_key.expose_secret()
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
