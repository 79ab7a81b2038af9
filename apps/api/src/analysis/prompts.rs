// Prompt construction for career analysis.
//
// The four instruction lines below are the headers the section extractor keys on.
// Change them together with `extractor::classify_header`.

use crate::analysis::questionnaire::{QuestionnaireField, QuestionnaireInput};

pub const NOT_SPECIFIED: &str = "Not specified";

pub const ANALYSIS_PREAMBLE: &str =
    "Based on the following career information, provide a comprehensive analysis:";

pub const ANALYSIS_INSTRUCTIONS: &str = "Please provide:
1. A career profile summary
2. CV improvement recommendations
3. Interview preparation tips
4. A skill development plan
";

/// Renders the questionnaire into the generation prompt. Never fails.
pub fn build_prompt(input: &QuestionnaireInput) -> String {
    let mut prompt = String::new();
    prompt.push('\n');
    prompt.push_str(ANALYSIS_PREAMBLE);
    prompt.push_str("\n\n");

    for field in QuestionnaireField::ALL {
        let value = input.answer(field).unwrap_or(NOT_SPECIFIED);
        prompt.push_str(&format!("{}: {}\n", field.label(), value));
    }

    prompt.push('\n');
    prompt.push_str(ANALYSIS_INSTRUCTIONS);
    prompt
}
