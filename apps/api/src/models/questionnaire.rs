use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::questionnaire::QuestionnaireInput;
use crate::models::analysis::AnalysisRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuestionnaireRow {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub answers: QuestionnaireInput,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A questionnaire together with its analysis, if one has been generated.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireWithAnalysis {
    #[serde(flatten)]
    pub questionnaire: QuestionnaireRow,
    pub ai_analysis: Option<AnalysisRow>,
}
