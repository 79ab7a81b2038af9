//! Locally-hosted model backend.
//!
//! Talks to a text-generation server running next to the API (e.g. a
//! `transformers` pipeline behind a small HTTP shim). Every failure is folded
//! into `LlmError::Local` so logs can tell the two backends apart.

use reqwest::Client;
use tracing::debug;

use super::{
    GenerationParameters, GenerationRequest, GenerationResponse, LlmError, MAX_LENGTH,
};

#[derive(Debug, Clone)]
pub struct LocalInferenceClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl LocalInferenceClient {
    pub fn new(client: Client, endpoint: &str, model: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.invoke(prompt)
            .await
            .map_err(|e| LlmError::Local(e.to_string()))
    }

    async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerationRequest {
            model: Some(&self.model),
            inputs: prompt,
            parameters: GenerationParameters {
                max_length: MAX_LENGTH,
                num_return_sequences: Some(1),
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
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

        let text = parse_local_generated_text(&body)?;
        debug!(
            "Local inference succeeded: model={}, chars={}",
            self.model,
            text.len()
        );

        Ok(text)
    }
}

/// Local servers may legitimately return no sequences, which reads as empty text.
/// A sequence that lacks `generated_text` is a broken server and fails the call.
fn parse_local_generated_text(body: &str) -> Result<String, LlmError> {
    let first = match serde_json::from_str::<GenerationResponse>(body)? {
        GenerationResponse::Single(sequence) => sequence,
        GenerationResponse::Batch(sequences) => match sequences.into_iter().next() {
            Some(sequence) => sequence,
            None => return Ok(String::new()),
        },
    };

    first.generated_text.ok_or_else(|| {
        LlmError::MalformedResponse("generated sequence has no generated_text".into())
    })
}
