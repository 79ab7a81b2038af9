//! Axum route handlers for questionnaire submission and analysis records.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::analysis::questionnaire::QuestionnaireInput;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::models::questionnaire::{QuestionnaireRow, QuestionnaireWithAnalysis};
use crate::models::user::UserRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitQuestionnaireRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub answers: QuestionnaireInput,
}

impl SubmitQuestionnaireRequest {
    /// Trimmed email, `None` when blank. Rejects values that cannot be an address.
    fn validated_email(&self) -> Result<Option<&str>, AppError> {
        match self.email.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(email) if email.contains('@') && !email.contains(char::is_whitespace) => {
                Ok(Some(email))
            }
            Some(email) => Err(AppError::Validation(format!(
                "'{email}' is not a valid email address"
            ))),
        }
    }
}

/// Inspection view of an analysis: the untouched backend output next to its error.
#[derive(Debug, Serialize)]
pub struct RawAnalysisOutput {
    pub id: Uuid,
    pub questionnaire_id: Uuid,
    pub raw_ai_response: Option<Value>,
    pub generation_error: Option<String>,
}

impl From<AnalysisRow> for RawAnalysisOutput {
    fn from(row: AnalysisRow) -> Self {
        Self {
            id: row.id,
            questionnaire_id: row.questionnaire_id,
            raw_ai_response: row.raw_ai_response,
            generation_error: row.generation_error,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/submit-questionnaire
///
/// Stores the questionnaire, runs the analysis pipeline and stores its result.
/// A failed generation is still stored and returned (with `generation_error` set).
pub async fn handle_submit_questionnaire(
    State(state): State<AppState>,
    Json(request): Json<SubmitQuestionnaireRequest>,
) -> Result<(StatusCode, Json<QuestionnaireWithAnalysis>), AppError> {
    let email = request.validated_email()?;

    let user = state.store.get_or_create_user(email).await?;
    let questionnaire = state
        .store
        .insert_questionnaire(user.id, &request.answers)
        .await?;

    let response = run_analysis(&state, questionnaire).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/questionnaires/:id/generate-analysis
///
/// Re-runs the pipeline for a stored questionnaire, replacing any previous analysis.
pub async fn handle_generate_analysis(
    State(state): State<AppState>,
    Path(questionnaire_id): Path<Uuid>,
) -> Result<Json<QuestionnaireWithAnalysis>, AppError> {
    let questionnaire = find_questionnaire(&state, questionnaire_id).await?;
    let response = run_analysis(&state, questionnaire).await?;
    Ok(Json(response))
}

/// GET /api/v1/questionnaires
pub async fn handle_list_questionnaires(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuestionnaireWithAnalysis>>, AppError> {
    let questionnaires = state.store.list_questionnaires().await?;

    let mut response = Vec::with_capacity(questionnaires.len());
    for questionnaire in questionnaires {
        response.push(with_analysis(&state, questionnaire).await?);
    }

    Ok(Json(response))
}

/// GET /api/v1/questionnaires/:id
pub async fn handle_get_questionnaire(
    State(state): State<AppState>,
    Path(questionnaire_id): Path<Uuid>,
) -> Result<Json<QuestionnaireWithAnalysis>, AppError> {
    let questionnaire = find_questionnaire(&state, questionnaire_id).await?;
    Ok(Json(with_analysis(&state, questionnaire).await?))
}

/// GET /api/v1/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalysisRow>>, AppError> {
    Ok(Json(state.store.list_analyses().await?))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
) -> Result<Json<AnalysisRow>, AppError> {
    let analysis = state
        .store
        .get_analysis(analysis_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {analysis_id} not found")))?;
    Ok(Json(analysis))
}

/// GET /api/v1/analyses/:id/raw
///
/// Raw model output for diagnosing section extraction. `raw_ai_response` is null
/// when generation failed before any text came back.
pub async fn handle_get_analysis_raw(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
) -> Result<Json<RawAnalysisOutput>, AppError> {
    let analysis = state
        .store
        .get_analysis(analysis_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {analysis_id} not found")))?;
    Ok(Json(analysis.into()))
}

/// GET /api/v1/users
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRow>>, AppError> {
    Ok(Json(state.store.list_users().await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn find_questionnaire(
    state: &AppState,
    questionnaire_id: Uuid,
) -> Result<QuestionnaireRow, AppError> {
    state
        .store
        .get_questionnaire(questionnaire_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Questionnaire {questionnaire_id} not found")))
}

async fn with_analysis(
    state: &AppState,
    questionnaire: QuestionnaireRow,
) -> Result<QuestionnaireWithAnalysis, AppError> {
    let ai_analysis = state
        .store
        .get_analysis_for_questionnaire(questionnaire.id)
        .await?;
    Ok(QuestionnaireWithAnalysis {
        questionnaire,
        ai_analysis,
    })
}

async fn run_analysis(
    state: &AppState,
    questionnaire: QuestionnaireRow,
) -> Result<QuestionnaireWithAnalysis, AppError> {
    info!("Generating career analysis for questionnaire {}", questionnaire.id);

    let outcome = state.analyzer.analyze(&questionnaire.answers).await;
    if outcome.is_degraded() {
        info!(
            "Storing fallback analysis for questionnaire {}",
            questionnaire.id
        );
    }
    let analysis = state
        .store
        .upsert_analysis(questionnaire.id, outcome.result())
        .await?;

    Ok(QuestionnaireWithAnalysis {
        questionnaire,
        ai_analysis: Some(analysis),
    })
}
