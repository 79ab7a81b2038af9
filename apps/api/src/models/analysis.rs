use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Stored analysis, one per questionnaire.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub questionnaire_id: Uuid,
    pub career_profile_summary: String,
    pub cv_recommendations: String,
    pub interview_tips: String,
    pub skill_development_plan: String,
    /// Raw backend output. Only served by `GET /api/v1/analyses/:id/raw`.
    #[serde(skip_serializing)]
    pub raw_ai_response: Option<Value>,
    /// Set when the sections hold fallback text because generation failed.
    pub generation_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
