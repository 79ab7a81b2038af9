//! Generation backends — the single point of entry for all text-generation calls.
//!
//! ARCHITECTURAL RULE: No other module may call an inference endpoint directly.
//! Both backends share one contract: a prompt goes in, raw generated text comes out.
//!
//! The backend is chosen once, from `GenerationBackendConfig`: a configured credential
//! selects the hosted inference API, otherwise the locally-hosted model is used.
//! There is no cascade between the two and no retry.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod local;
pub mod remote;

pub use local::LocalInferenceClient;
pub use remote::RemoteInferenceClient;

pub const DEFAULT_MODEL: &str = "gpt2";
pub const DEFAULT_API_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://127.0.0.1:8111/generate";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
/// Output cap sent to both backends.
pub const MAX_LENGTH: u32 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status code {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Local model generation failed: {0}")]
    Local(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Remote,
    Local,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Remote => f.write_str("remote"),
            BackendKind::Local => f.write_str("local"),
        }
    }
}

/// Everything needed to build a `GenerationBackend`. Resolved once at startup.
#[derive(Clone)]
pub struct GenerationBackendConfig {
    pub model: String,
    /// Hosted inference credential. Empty or absent selects the local backend.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub local_endpoint: String,
    pub timeout: Duration,
}

impl Default for GenerationBackendConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            local_endpoint: DEFAULT_LOCAL_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// The credential never reaches logs.
impl fmt::Debug for GenerationBackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationBackendConfig")
            .field("model", &self.model)
            .field("api_key", &self.credential().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("local_endpoint", &self.local_endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GenerationBackendConfig {
    fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Which backend this configuration selects.
    pub fn kind(&self) -> BackendKind {
        match self.credential() {
            Some(_) => BackendKind::Remote,
            None => BackendKind::Local,
        }
    }
}

/// The closed set of generation backends behind one `generate` contract.
#[derive(Debug, Clone)]
pub enum GenerationBackend {
    Remote(RemoteInferenceClient),
    Local(LocalInferenceClient),
}

impl GenerationBackend {
    pub fn from_config(config: &GenerationBackendConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        let backend = match config.credential() {
            Some(api_key) => Self::Remote(RemoteInferenceClient::new(
                client,
                &config.api_base_url,
                &config.model,
                api_key,
            )),
            None => Self::Local(LocalInferenceClient::new(
                client,
                &config.local_endpoint,
                &config.model,
            )),
        };

        Ok(backend)
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Remote(_) => BackendKind::Remote,
            Self::Local(_) => BackendKind::Local,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Self::Remote(client) => client.model(),
            Self::Local(client) => client.model(),
        }
    }

    /// Issues exactly one generation request and returns the raw generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        match self {
            Self::Remote(client) => client.generate(prompt).await,
            Self::Local(client) => client.generate(prompt).await,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_return_sequences: Option<u32>,
}

/// Text-generation endpoints answer with either one object or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<GeneratedSequence>),
    Single(GeneratedSequence),
}

#[derive(Debug, Deserialize)]
struct GeneratedSequence {
    #[serde(default)]
    generated_text: Option<String>,
}

/// Pulls `generated_text` out of a hosted-API response body (first element when it
/// is a list). A sequence without the field reads as empty text.
fn parse_generated_text(body: &str) -> Result<String, LlmError> {
    match serde_json::from_str::<GenerationResponse>(body)? {
        GenerationResponse::Single(sequence) => Ok(sequence.generated_text.unwrap_or_default()),
        GenerationResponse::Batch(sequences) => sequences
            .into_iter()
            .next()
            .map(|sequence| sequence.generated_text.unwrap_or_default())
            .ok_or_else(|| {
                LlmError::MalformedResponse("response contained no generated sequences".into())
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(api_key: Option<&str>) -> GenerationBackendConfig {
        GenerationBackendConfig {
            api_key: api_key.map(str::to_string),
            ..GenerationBackendConfig::default()
        }
    }

    #[test]
    fn test_credential_selects_remote_even_with_local_endpoint() {
        let config = GenerationBackendConfig {
            local_endpoint: "http://127.0.0.1:9000/generate".to_string(),
            ..config_with_key(Some("hf_secret"))
        };
        assert_eq!(config.kind(), BackendKind::Remote);

        let backend = GenerationBackend::from_config(&config).unwrap();
        assert_eq!(backend.kind(), BackendKind::Remote);
        assert_eq!(backend.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_missing_or_blank_credential_selects_local() {
        assert_eq!(config_with_key(None).kind(), BackendKind::Local);
        assert_eq!(config_with_key(Some("")).kind(), BackendKind::Local);
        assert_eq!(config_with_key(Some("   ")).kind(), BackendKind::Local);

        let backend = GenerationBackend::from_config(&config_with_key(None)).unwrap();
        assert_eq!(backend.kind(), BackendKind::Local);
    }

    #[test]
    fn test_debug_output_redacts_credential() {
        let rendered = format!("{:?}", config_with_key(Some("hf_secret")));
        assert!(!rendered.contains("hf_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_parse_generated_text_from_list() {
        let body = r#"[{"generated_text": "first"}, {"generated_text": "second"}]"#;
        assert_eq!(parse_generated_text(body).unwrap(), "first");
    }

    #[test]
    fn test_parse_generated_text_from_object() {
        let body = r#"{"generated_text": "only"}"#;
        assert_eq!(parse_generated_text(body).unwrap(), "only");
    }

    #[test]
    fn test_parse_generated_text_missing_field_is_empty() {
        assert_eq!(parse_generated_text(r#"{"score": 0.5}"#).unwrap(), "");
    }

    #[test]
    fn test_parse_generated_text_empty_list_is_malformed() {
        let err = parse_generated_text("[]").unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_generated_text_rejects_non_json() {
        let err = parse_generated_text("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerationRequest {
            model: None,
            inputs: "hello",
            parameters: GenerationParameters {
                max_length: MAX_LENGTH,
                num_return_sequences: None,
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"inputs": "hello", "parameters": {"max_length": 1000}})
        );
    }
}
