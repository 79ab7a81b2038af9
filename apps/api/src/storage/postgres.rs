use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::questionnaire::QuestionnaireInput;
use crate::analysis::result::AnalysisResult;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::models::questionnaire::QuestionnaireRow;
use crate::models::user::UserRow;
use crate::storage::{raw_response_value, AnalysisStore};

/// PostgreSQL-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn get_or_create_user(&self, email: Option<&str>) -> Result<UserRow, AppError> {
        let user = match email {
            // The no-op update makes RETURNING yield the existing row on conflict.
            Some(email) => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    INSERT INTO users (email) VALUES ($1)
                    ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
                    RETURNING *
                    "#,
                )
                .bind(email)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, UserRow>("INSERT INTO users DEFAULT VALUES RETURNING *")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRow>, AppError> {
        let users = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn insert_questionnaire(
        &self,
        user_id: Uuid,
        answers: &QuestionnaireInput,
    ) -> Result<QuestionnaireRow, AppError> {
        let row = sqlx::query_as::<_, QuestionnaireRow>(
            r#"
            INSERT INTO questionnaires
                (user_id, "current_role", years_experience, key_skills, education,
                 career_achievements, job_seeking, cv_challenges, interview_challenges,
                 soft_skills, career_goals)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&answers.current_role)
        .bind(&answers.years_experience)
        .bind(&answers.key_skills)
        .bind(&answers.education)
        .bind(&answers.career_achievements)
        .bind(&answers.job_seeking)
        .bind(&answers.cv_challenges)
        .bind(&answers.interview_challenges)
        .bind(&answers.soft_skills)
        .bind(&answers.career_goals)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored questionnaire {} for user {}", row.id, user_id);
        Ok(row)
    }

    async fn get_questionnaire(&self, id: Uuid) -> Result<Option<QuestionnaireRow>, AppError> {
        let row = sqlx::query_as::<_, QuestionnaireRow>("SELECT * FROM questionnaires WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_questionnaires(&self) -> Result<Vec<QuestionnaireRow>, AppError> {
        let rows = sqlx::query_as::<_, QuestionnaireRow>(
            "SELECT * FROM questionnaires ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn upsert_analysis(
        &self,
        questionnaire_id: Uuid,
        result: &AnalysisResult,
    ) -> Result<AnalysisRow, AppError> {
        let row = sqlx::query_as::<_, AnalysisRow>(
            r#"
            INSERT INTO analyses
                (questionnaire_id, career_profile_summary, cv_recommendations,
                 interview_tips, skill_development_plan, raw_ai_response, generation_error)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (questionnaire_id) DO UPDATE SET
                career_profile_summary = EXCLUDED.career_profile_summary,
                cv_recommendations     = EXCLUDED.cv_recommendations,
                interview_tips         = EXCLUDED.interview_tips,
                skill_development_plan = EXCLUDED.skill_development_plan,
                raw_ai_response        = EXCLUDED.raw_ai_response,
                generation_error       = EXCLUDED.generation_error,
                updated_at             = now()
            RETURNING *
            "#,
        )
        .bind(questionnaire_id)
        .bind(&result.career_profile_summary)
        .bind(&result.cv_recommendations)
        .bind(&result.interview_tips)
        .bind(&result.skill_development_plan)
        .bind(raw_response_value(result))
        .bind(&result.error)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Stored analysis {} for questionnaire {}",
            row.id, questionnaire_id
        );
        Ok(row)
    }

    async fn get_analysis(&self, id: Uuid) -> Result<Option<AnalysisRow>, AppError> {
        let row = sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_analysis_for_questionnaire(
        &self,
        questionnaire_id: Uuid,
    ) -> Result<Option<AnalysisRow>, AppError> {
        let row =
            sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE questionnaire_id = $1")
                .bind(questionnaire_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisRow>, AppError> {
        let rows = sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
