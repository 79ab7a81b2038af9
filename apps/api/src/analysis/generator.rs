//! Career Analysis — orchestrates the generation pipeline.
//!
//! Flow: build_prompt → backend.generate → extract → GenerationOutcome.
//!
//! Backend failures never leave this module. They are converted into a
//! `GenerationOutcome::Degraded` carrying the fixed fallback sections and the
//! error description, so callers always get a complete four-section result.

use tracing::{info, warn};

use crate::analysis::extractor::extract;
use crate::analysis::prompts::build_prompt;
use crate::analysis::questionnaire::QuestionnaireInput;
use crate::analysis::result::AnalysisResult;
use crate::llm_client::{GenerationBackend, GenerationBackendConfig, LlmError};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The backend answered; sections were extracted from its text.
    Completed(AnalysisResult),
    /// The backend failed; sections hold the fallback text and `error` is set.
    Degraded(AnalysisResult),
}

impl GenerationOutcome {
    pub fn result(&self) -> &AnalysisResult {
        match self {
            Self::Completed(result) | Self::Degraded(result) => result,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Sends `prompt` to `backend` and turns whatever comes back into a `GenerationOutcome`.
pub async fn generate(prompt: &str, backend: &GenerationBackend) -> GenerationOutcome {
    match backend.generate(prompt).await {
        Ok(raw_text) => GenerationOutcome::Completed(extract(&raw_text)),
        Err(e) => {
            warn!(
                "Career analysis generation failed ({} backend, model {}): {e}",
                backend.kind(),
                backend.model()
            );
            GenerationOutcome::Degraded(AnalysisResult::fallback(e.to_string()))
        }
    }
}

/// Stateless front door to the pipeline. Cheap to clone; holds only the backend.
#[derive(Debug, Clone)]
pub struct CareerAnalyzer {
    backend: GenerationBackend,
}

impl CareerAnalyzer {
    pub fn new(backend: GenerationBackend) -> Self {
        Self { backend }
    }

    pub fn from_config(config: &GenerationBackendConfig) -> Result<Self, LlmError> {
        Ok(Self::new(GenerationBackend::from_config(config)?))
    }

    pub fn backend(&self) -> &GenerationBackend {
        &self.backend
    }

    /// Runs prompt building, generation and section extraction for one questionnaire.
    pub async fn analyze(&self, input: &QuestionnaireInput) -> GenerationOutcome {
        let prompt = build_prompt(input);
        let outcome = generate(&prompt, &self.backend).await;

        if let GenerationOutcome::Completed(result) = &outcome {
            if result.has_empty_sections() {
                warn!(
                    "No section headers found in {} chars of generated text; raw output kept",
                    result.raw_response.len()
                );
            } else {
                info!(
                    "Career analysis generated via {} backend ({} chars)",
                    self.backend.kind(),
                    result.raw_response.len()
                );
            }
        }

        outcome
    }
}
