//! Hosted inference API backend (Hugging Face style `POST /models/<model>`).

use std::fmt;

use reqwest::Client;
use tracing::debug;

use super::{parse_generated_text, GenerationParameters, GenerationRequest, LlmError, MAX_LENGTH};

#[derive(Clone)]
pub struct RemoteInferenceClient {
    client: Client,
    url: String,
    model: String,
    api_key: String,
}

impl fmt::Debug for RemoteInferenceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteInferenceClient")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl RemoteInferenceClient {
    pub fn new(client: Client, base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            client,
            url: format!("{}/{}", base_url.trim_end_matches('/'), model),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One POST, no retry. Any non-2xx status is returned as `LlmError::Api`.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerationRequest {
            model: None,
            inputs: prompt,
            parameters: GenerationParameters {
                max_length: MAX_LENGTH,
                num_return_sequences: None,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let text = parse_generated_text(&body)?;
        debug!(
            "Remote inference succeeded: model={}, chars={}",
            self.model,
            text.len()
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use crate::test_support::spawn_stub;

    fn client_for(base_url: &str) -> RemoteInferenceClient {
        RemoteInferenceClient::new(Client::new(), base_url, "gpt2", "hf_test")
    }

    #[test]
    fn test_url_joins_base_and_model() {
        let client = client_for("https://example.test/models/");
        assert_eq!(client.url, "https://example.test/models/gpt2");
    }

    #[test]
    fn test_debug_output_hides_api_key() {
        let rendered = format!("{:?}", client_for("https://example.test"));
        assert!(!rendered.contains("hf_test"));
    }

    #[tokio::test]
    async fn test_generate_sends_bearer_and_payload() {
        let router = Router::new().route(
            "/models/gpt2",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!([{
                    "generated_text": format!(
                        "{}|{}|{}",
                        auth, body["inputs"].as_str().unwrap_or_default(), body["parameters"]
                    )
                }]))
            }),
        );
        let base = spawn_stub(router).await;

        let text = client_for(&format!("{base}/models"))
            .generate("Tell me")
            .await
            .unwrap();

        assert_eq!(text, r#"Bearer hf_test|Tell me|{"max_length":1000}"#);
    }

    #[tokio::test]
    async fn test_generate_accepts_single_object_response() {
        let router = Router::new().route(
            "/models/gpt2",
            post(|| async { Json(json!({"generated_text": "single"})) }),
        );
        let base = spawn_stub(router).await;

        let text = client_for(&format!("{base}/models"))
            .generate("prompt")
            .await
            .unwrap();
        assert_eq!(text, "single");
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let router = Router::new().route(
            "/models/gpt2",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model is loading") }),
        );
        let base = spawn_stub(router).await;

        let err = client_for(&format!("{base}/models"))
            .generate("prompt")
            .await
            .unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "model is loading");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
