//! Questionnaire answers — the pipeline's only input.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// The ten recognised career-attribute keys, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionnaireField {
    CurrentRole,
    YearsExperience,
    KeySkills,
    Education,
    CareerAchievements,
    JobSeeking,
    CvChallenges,
    InterviewChallenges,
    SoftSkills,
    CareerGoals,
}

impl QuestionnaireField {
    pub const ALL: [QuestionnaireField; 10] = [
        Self::CurrentRole,
        Self::YearsExperience,
        Self::KeySkills,
        Self::Education,
        Self::CareerAchievements,
        Self::JobSeeking,
        Self::CvChallenges,
        Self::InterviewChallenges,
        Self::SoftSkills,
        Self::CareerGoals,
    ];

    /// Label used in the generation prompt.
    pub fn label(self) -> &'static str {
        match self {
            Self::CurrentRole => "Current Role",
            Self::YearsExperience => "Years of Experience",
            Self::KeySkills => "Key Skills",
            Self::Education => "Education",
            Self::CareerAchievements => "Career Achievements",
            Self::JobSeeking => "Job Seeking",
            Self::CvChallenges => "CV Challenges",
            Self::InterviewChallenges => "Interview Challenges",
            Self::SoftSkills => "Soft Skills to Improve",
            Self::CareerGoals => "Career Goals",
        }
    }
}

/// Career questionnaire answers. Every field is optional.
///
/// Answers arrive from forms, so numbers and booleans are accepted and kept as
/// text, and lists of strings are joined with ", ".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuestionnaireInput {
    #[serde(default, deserialize_with = "answer_text")]
    pub current_role: Option<String>,
    #[serde(default, deserialize_with = "answer_text")]
    pub years_experience: Option<String>,
    #[serde(default, deserialize_with = "answer_text")]
    pub key_skills: Option<String>,
    #[serde(default, deserialize_with = "answer_text")]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "answer_text")]
    pub career_achievements: Option<String>,
    #[serde(default, deserialize_with = "answer_text")]
    pub job_seeking: Option<String>,
    #[serde(default, deserialize_with = "answer_text")]
    pub cv_challenges: Option<String>,
    #[serde(default, deserialize_with = "answer_text")]
    pub interview_challenges: Option<String>,
    #[serde(default, deserialize_with = "answer_text")]
    pub soft_skills: Option<String>,
    #[serde(default, deserialize_with = "answer_text")]
    pub career_goals: Option<String>,
}

impl QuestionnaireInput {
    pub fn get(&self, field: QuestionnaireField) -> Option<&str> {
        let value = match field {
            QuestionnaireField::CurrentRole => &self.current_role,
            QuestionnaireField::YearsExperience => &self.years_experience,
            QuestionnaireField::KeySkills => &self.key_skills,
            QuestionnaireField::Education => &self.education,
            QuestionnaireField::CareerAchievements => &self.career_achievements,
            QuestionnaireField::JobSeeking => &self.job_seeking,
            QuestionnaireField::CvChallenges => &self.cv_challenges,
            QuestionnaireField::InterviewChallenges => &self.interview_challenges,
            QuestionnaireField::SoftSkills => &self.soft_skills,
            QuestionnaireField::CareerGoals => &self.career_goals,
        };
        value.as_deref()
    }

    /// The answer for `field` if it carries any non-whitespace text.
    pub fn answer(&self, field: QuestionnaireField) -> Option<&str> {
        self.get(field).filter(|value| !value.trim().is_empty())
    }
}

fn answer_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => Ok(text),
                Value::Number(number) => Ok(number.to_string()),
                other => Err(de::Error::custom(format!(
                    "expected a list of text answers, found {other}"
                ))),
            })
            .collect::<Result<Vec<_>, D::Error>>()
            .map(|items| Some(items.join(", "))),
        Some(other) => Err(de::Error::custom(format!(
            "expected a text answer, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_deserialize_to_none() {
        let input: QuestionnaireInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input, QuestionnaireInput::default());
    }

    #[test]
    fn test_numbers_nulls_and_lists_are_accepted() {
        let input: QuestionnaireInput = serde_json::from_value(json!({
            "current_role": "Backend Engineer",
            "years_experience": 7,
            "key_skills": ["Rust", "Postgres"],
            "education": null,
            "job_seeking": true
        }))
        .unwrap();

        assert_eq!(input.current_role.as_deref(), Some("Backend Engineer"));
        assert_eq!(input.years_experience.as_deref(), Some("7"));
        assert_eq!(input.key_skills.as_deref(), Some("Rust, Postgres"));
        assert_eq!(input.education, None);
        assert_eq!(input.job_seeking.as_deref(), Some("true"));
    }

    #[test]
    fn test_object_answer_is_rejected() {
        let result: Result<QuestionnaireInput, _> =
            serde_json::from_value(json!({"career_goals": {"short": "lead"}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_answer_skips_blank_values() {
        let input = QuestionnaireInput {
            education: Some("   ".to_string()),
            soft_skills: Some("Public speaking".to_string()),
            ..Default::default()
        };
        assert_eq!(input.answer(QuestionnaireField::Education), None);
        assert_eq!(input.get(QuestionnaireField::Education), Some("   "));
        assert_eq!(
            input.answer(QuestionnaireField::SoftSkills),
            Some("Public speaking")
        );
    }
}
