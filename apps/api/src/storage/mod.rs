//! Record storage — users, questionnaires and their analyses.
//!
//! Handlers only see `AnalysisStore`; `AppState` carries it as `Arc<dyn AnalysisStore>`.
//! The production implementation is `PgAnalysisStore`.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::questionnaire::QuestionnaireInput;
use crate::analysis::result::AnalysisResult;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::models::questionnaire::QuestionnaireRow;
use crate::models::user::UserRow;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgAnalysisStore;

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Returns the user with `email`, creating it if needed. `None` always creates
    /// a fresh anonymous user.
    async fn get_or_create_user(&self, email: Option<&str>) -> Result<UserRow, AppError>;

    async fn list_users(&self) -> Result<Vec<UserRow>, AppError>;

    async fn insert_questionnaire(
        &self,
        user_id: Uuid,
        answers: &QuestionnaireInput,
    ) -> Result<QuestionnaireRow, AppError>;

    async fn get_questionnaire(&self, id: Uuid) -> Result<Option<QuestionnaireRow>, AppError>;

    /// Newest first.
    async fn list_questionnaires(&self) -> Result<Vec<QuestionnaireRow>, AppError>;

    /// Creates or replaces the analysis attached to `questionnaire_id`.
    async fn upsert_analysis(
        &self,
        questionnaire_id: Uuid,
        result: &AnalysisResult,
    ) -> Result<AnalysisRow, AppError>;

    async fn get_analysis(&self, id: Uuid) -> Result<Option<AnalysisRow>, AppError>;

    async fn get_analysis_for_questionnaire(
        &self,
        questionnaire_id: Uuid,
    ) -> Result<Option<AnalysisRow>, AppError>;

    /// Newest first.
    async fn list_analyses(&self) -> Result<Vec<AnalysisRow>, AppError>;
}

/// The raw output as stored: a JSON string, or null when generation produced nothing.
pub(crate) fn raw_response_value(result: &AnalysisResult) -> Option<Value> {
    if result.raw_response.is_empty() && result.error.is_some() {
        None
    } else {
        Some(Value::String(result.raw_response.clone()))
    }
}
