use serde::{Deserialize, Serialize};

pub const FALLBACK_PROFILE: &str = "Unable to generate profile at this time.";
pub const FALLBACK_CV_RECOMMENDATIONS: &str = "Unable to generate recommendations at this time.";
pub const FALLBACK_INTERVIEW_TIPS: &str = "Unable to generate tips at this time.";
pub const FALLBACK_SKILL_PLAN: &str = "Unable to generate plan at this time.";

/// Structured career analysis. The four sections are always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub career_profile_summary: String,
    pub cv_recommendations: String,
    pub interview_tips: String,
    pub skill_development_plan: String,
    /// Unprocessed backend output. Empty when generation failed.
    pub raw_response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// The degraded result returned when no backend output is available.
    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            career_profile_summary: FALLBACK_PROFILE.to_string(),
            cv_recommendations: FALLBACK_CV_RECOMMENDATIONS.to_string(),
            interview_tips: FALLBACK_INTERVIEW_TIPS.to_string(),
            skill_development_plan: FALLBACK_SKILL_PLAN.to_string(),
            raw_response: String::new(),
            error: Some(error.into()),
        }
    }

    /// True when every section came back empty. Together with a non-empty
    /// `raw_response` this means the headers were not found, not that generation failed.
    pub fn has_empty_sections(&self) -> bool {
        [
            &self.career_profile_summary,
            &self.cv_recommendations,
            &self.interview_tips,
            &self.skill_development_plan,
        ]
        .iter()
        .all(|section| section.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_fills_every_section() {
        let result = AnalysisResult::fallback("boom");
        assert_eq!(result.career_profile_summary, FALLBACK_PROFILE);
        assert_eq!(result.cv_recommendations, FALLBACK_CV_RECOMMENDATIONS);
        assert_eq!(result.interview_tips, FALLBACK_INTERVIEW_TIPS);
        assert_eq!(result.skill_development_plan, FALLBACK_SKILL_PLAN);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert!(!result.has_empty_sections());
    }

    #[test]
    fn test_error_is_omitted_from_json_when_absent() {
        let value = serde_json::to_value(AnalysisResult::default()).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(value["career_profile_summary"], "");
        assert_eq!(value["raw_response"], "");
    }
}
