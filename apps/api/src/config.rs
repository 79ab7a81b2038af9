use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{
    GenerationBackendConfig, DEFAULT_API_BASE_URL, DEFAULT_LOCAL_ENDPOINT, DEFAULT_MODEL,
    DEFAULT_TIMEOUT_SECS,
};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub generation: GenerationBackendConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = match optional_env("LLM_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            generation: GenerationBackendConfig {
                model: optional_env("HF_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_key: optional_env("HUGGINGFACE_API_KEY"),
                api_base_url: optional_env("HF_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
                local_endpoint: optional_env("LOCAL_MODEL_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_LOCAL_ENDPOINT.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
