//! Formatting issues and improvement recommendations derived from the score

/// Candidate formatting issues, reported as a prefix of this list.
pub const FORMATTING_ISSUE_CANDIDATES: [&str; 7] = [
    "Inconsistent date formatting detected",
    "Multiple font styles used - recommend using 1-2 fonts maximum",
    "Bullet points not aligned consistently",
    "Section headers lack visual hierarchy",
    "Contact information could be more prominent",
    "Excessive use of bold text reduces impact",
    "Line spacing inconsistent between sections",
];

pub const QUANTIFY_ACHIEVEMENTS: &str = "Quantify achievements with specific metrics and numbers";
pub const TAILOR_SUMMARY: &str = "Tailor professional summary to match job requirements more closely";
pub const IMPROVE_FORMATTING: &str = "Improve document formatting for better ATS compatibility";
pub const ADD_KEYWORDS: &str = "Include more keywords from the job description naturally";
pub const ADD_CERTIFICATIONS: &str = "Add relevant certifications or training if available";
pub const USE_ACTION_VERBS: &str = "Use action verbs to start bullet points (e.g., Led, Developed, Implemented)";

const NO_ISSUES_THRESHOLD: u8 = 85;
const TAILORING_THRESHOLD: u8 = 80;
const KEYWORD_THRESHOLD: u8 = 70;
const MAX_LISTED_MISSING: usize = 3;

/// Formatting issues to report for a score (at most three)
pub fn formatting_issues(score: u8) -> Vec<String> {
    let count = match score {
        s if s >= NO_ISSUES_THRESHOLD => 0,
        70..=84 => 1,
        60..=69 => 2,
        _ => 3,
    };

    FORMATTING_ISSUE_CANDIDATES[..count]
        .iter()
        .map(|issue| issue.to_string())
        .collect()
}

/// Ordered improvement recommendations; never empty
pub fn recommendations(missing_skills: &[String], score: u8, has_formatting_issues: bool) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !missing_skills.is_empty() {
        let top_missing = missing_skills
            .iter()
            .take(MAX_LISTED_MISSING)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        recommendations.push(format!("Add relevant experience with: {}", top_missing));
    }

    if score < TAILORING_THRESHOLD {
        recommendations.push(QUANTIFY_ACHIEVEMENTS.to_string());
        recommendations.push(TAILOR_SUMMARY.to_string());
    }

    if has_formatting_issues {
        recommendations.push(IMPROVE_FORMATTING.to_string());
    }

    if score < KEYWORD_THRESHOLD {
        recommendations.push(ADD_KEYWORDS.to_string());
        recommendations.push(ADD_CERTIFICATIONS.to_string());
    }

    recommendations.push(USE_ACTION_VERBS.to_string());
    recommendations
}
