//! In-memory `AnalysisStore` for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::analysis::questionnaire::QuestionnaireInput;
use crate::analysis::result::AnalysisResult;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::models::questionnaire::QuestionnaireRow;
use crate::models::user::UserRow;
use crate::storage::{raw_response_value, AnalysisStore};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserRow>>,
    questionnaires: Mutex<Vec<QuestionnaireRow>>,
    analyses: Mutex<Vec<AnalysisRow>>,
}

impl MemoryStore {
    pub fn analysis_count(&self) -> usize {
        self.analyses.lock().unwrap().len()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

fn newest_first<T: Clone>(rows: &[T]) -> Vec<T> {
    rows.iter().rev().cloned().collect()
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn get_or_create_user(&self, email: Option<&str>) -> Result<UserRow, AppError> {
        let mut users = self.users.lock().unwrap();
        if let Some(email) = email {
            if let Some(user) = users.iter().find(|u| u.email.as_deref() == Some(email)) {
                return Ok(user.clone());
            }
        }

        let now = Utc::now();
        let user = UserRow {
            id: Uuid::new_v4(),
            email: email.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRow>, AppError> {
        Ok(newest_first(self.users.lock().unwrap().as_slice()))
    }

    async fn insert_questionnaire(
        &self,
        user_id: Uuid,
        answers: &QuestionnaireInput,
    ) -> Result<QuestionnaireRow, AppError> {
        let now = Utc::now();
        let row = QuestionnaireRow {
            id: Uuid::new_v4(),
            user_id,
            answers: answers.clone(),
            created_at: now,
            updated_at: now,
        };
        self.questionnaires.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn get_questionnaire(&self, id: Uuid) -> Result<Option<QuestionnaireRow>, AppError> {
        Ok(self
            .questionnaires
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn list_questionnaires(&self) -> Result<Vec<QuestionnaireRow>, AppError> {
        Ok(newest_first(self.questionnaires.lock().unwrap().as_slice()))
    }

    async fn upsert_analysis(
        &self,
        questionnaire_id: Uuid,
        result: &AnalysisResult,
    ) -> Result<AnalysisRow, AppError> {
        let mut analyses = self.analyses.lock().unwrap();
        let now = Utc::now();
        let existing = analyses
            .iter()
            .position(|a| a.questionnaire_id == questionnaire_id);

        let row = AnalysisRow {
            id: existing.map(|i| analyses[i].id).unwrap_or_else(Uuid::new_v4),
            questionnaire_id,
            career_profile_summary: result.career_profile_summary.clone(),
            cv_recommendations: result.cv_recommendations.clone(),
            interview_tips: result.interview_tips.clone(),
            skill_development_plan: result.skill_development_plan.clone(),
            raw_ai_response: raw_response_value(result),
            generation_error: result.error.clone(),
            created_at: existing.map(|i| analyses[i].created_at).unwrap_or(now),
            updated_at: now,
        };

        match existing {
            Some(i) => analyses[i] = row.clone(),
            None => analyses.push(row.clone()),
        }
        Ok(row)
    }

    async fn get_analysis(&self, id: Uuid) -> Result<Option<AnalysisRow>, AppError> {
        Ok(self
            .analyses
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn get_analysis_for_questionnaire(
        &self,
        questionnaire_id: Uuid,
    ) -> Result<Option<AnalysisRow>, AppError> {
        Ok(self
            .analyses
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.questionnaire_id == questionnaire_id)
            .cloned())
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisRow>, AppError> {
        Ok(newest_first(self.analyses.lock().unwrap().as_slice()))
    }
}
