// Career analysis: prompt building, backend dispatch and section extraction.
// All generation calls go through llm_client; nothing here talks HTTP to a model directly.

pub mod extractor;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod questionnaire;
pub mod result;
