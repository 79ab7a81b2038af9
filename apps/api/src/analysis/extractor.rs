//! Section Extractor — splits free-form model output into the four analysis sections.
//!
//! A single cursor walks the lines in order. Header lines move the cursor and are
//! dropped; other non-blank lines are appended, untrimmed, to the current section.
//! Lines before the first header and blank lines are discarded.
//!
//! Matching is literal and case-insensitive. Output whose headers are paraphrased
//! (e.g. "Summary of Career Profile" matches, "Your background" does not) yields
//! empty sections while `raw_response` still carries everything.

use crate::analysis::result::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Profile,
    Cv,
    Interview,
    Skills,
}

/// Header rules in priority order. `line` must already be lower-cased.
pub fn classify_header(line: &str) -> Option<Section> {
    if line.contains("career profile") {
        Some(Section::Profile)
    } else if line.contains("cv") && line.contains("recommend") {
        Some(Section::Cv)
    } else if line.contains("interview") {
        Some(Section::Interview)
    } else if line.contains("skill") && line.contains("plan") {
        Some(Section::Skills)
    } else {
        None
    }
}

#[derive(Default)]
struct SectionLines<'a> {
    profile: Vec<&'a str>,
    cv: Vec<&'a str>,
    interview: Vec<&'a str>,
    skills: Vec<&'a str>,
}

impl<'a> SectionLines<'a> {
    fn push(&mut self, section: Section, line: &'a str) {
        match section {
            Section::Profile => self.profile.push(line),
            Section::Cv => self.cv.push(line),
            Section::Interview => self.interview.push(line),
            Section::Skills => self.skills.push(line),
        }
    }
}

fn join_section(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

/// Extracts the four sections from `raw_text`. Total and idempotent.
pub fn extract(raw_text: &str) -> AnalysisResult {
    let mut cursor: Option<Section> = None;
    let mut sections = SectionLines::default();

    for line in raw_text.split('\n') {
        if let Some(header) = classify_header(&line.to_lowercase()) {
            cursor = Some(header);
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        if let Some(section) = cursor {
            sections.push(section, line);
        }
    }

    AnalysisResult {
        career_profile_summary: join_section(&sections.profile),
        cv_recommendations: join_section(&sections.cv),
        interview_tips: join_section(&sections.interview),
        skill_development_plan: join_section(&sections.skills),
        raw_response: raw_text.to_string(),
        error: None,
    }
}
