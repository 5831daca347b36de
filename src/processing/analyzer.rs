//! End-to-end compatibility analysis combining extraction, matching, scoring and feedback

use crate::error::Result;
use crate::processing::feedback::{formatting_issues, recommendations};
use crate::processing::scorer::{
    bounded_spread, calculate_score, education_evaluation, experience_evaluation, score_category, EducationEvaluation,
    ExperienceEvaluation, Jitter, RandomJitter, ScoreCategory, DEFAULT_JITTER_SPREAD,
};
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::synonyms::SynonymMatcher;
use crate::processing::vocabulary::{SkillVocabulary, SynonymTable};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Number of leading vocabulary skills written into the placeholder resume body.
const SYNTHETIC_RESUME_SKILLS: usize = 8;

/// Education is judged this many points more leniently than the ATS score.
const EDUCATION_LENIENCY: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    /// Job skills also found in the resume
    pub matched: Vec<String>,
    /// Job skills absent from the resume
    pub missing: Vec<String>,
    /// Human-readable synonym cross-references
    pub synonym_matches: Vec<String>,
}

/// Outcome of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub ats_score: u8,
    pub score_category: ScoreCategory,
    pub skill_match: SkillMatch,
    pub experience_evaluation: ExperienceEvaluation,
    pub education_evaluation: EducationEvaluation,
    pub formatting_issues: Vec<String>,
    pub improvement_recommendations: Vec<String>,
}

/// Stateless analysis engine.
///
/// Holds only immutable lookup data, so one engine can serve any number of
/// concurrent analyses. Randomness comes from the caller through [`Jitter`].
pub struct AnalysisEngine {
    vocabulary: SkillVocabulary,
    extractor: SkillExtractor,
    synonym_matcher: SynonymMatcher,
    jitter_spread: f64,
}

impl AnalysisEngine {
    pub fn new() -> Result<Self> {
        Self::with_tables(SkillVocabulary::default(), SynonymTable::default())
    }

    pub fn with_tables(vocabulary: SkillVocabulary, synonyms: SynonymTable) -> Result<Self> {
        let extractor = SkillExtractor::new(&vocabulary)?;
        info!(
            "Analysis engine ready: {} skills, {} synonym entries",
            vocabulary.len(),
            synonyms.len()
        );

        Ok(Self {
            vocabulary,
            extractor,
            synonym_matcher: SynonymMatcher::new(synonyms),
            jitter_spread: DEFAULT_JITTER_SPREAD,
        })
    }

    /// Override the half-width of the score perturbation, bounded to `[0, MAX_JITTER_SPREAD]`
    pub fn with_jitter_spread(mut self, spread: f64) -> Self {
        self.jitter_spread = bounded_spread(spread);
        self
    }

    /// Placeholder resume text standing in for document extraction.
    ///
    /// Uploaded files are never parsed; the body always lists the leading vocabulary skills.
    pub fn synthetic_resume_body(&self) -> String {
        format!(
            "\n    Software Engineer with experience in {}.\n    Proficient in web development, database management, and cloud technologies.\n    Strong problem-solving and communication skills.\n  ",
            self.vocabulary.leading(SYNTHETIC_RESUME_SKILLS).join(", ")
        )
    }

    pub fn perform_analysis(&self, resume_label: &str, job_description: &str, jitter: &mut dyn Jitter) -> AnalysisResult {
        debug!(
            "Analyzing '{}' against {} characters of job text",
            resume_label,
            job_description.chars().count()
        );

        let job_skills = self.extractor.extract_skills(job_description);
        let resume_content = self.synthetic_resume_body();
        let resume_skills = self.extractor.extract_skills(&resume_content);
        let synonym_matches = self
            .synonym_matcher
            .find_synonym_matches(&resume_content, job_description);

        let in_resume = |skill: &String| {
            resume_skills
                .iter()
                .any(|r| r.to_lowercase() == skill.to_lowercase())
        };
        let (matched, missing): (Vec<String>, Vec<String>) =
            job_skills.iter().cloned().partition(|skill| in_resume(skill));

        let ats_score = calculate_score(matched.len(), job_skills.len(), self.jitter_spread, jitter);
        let score_category = score_category(ats_score);
        let experience_evaluation = experience_evaluation(ats_score);
        let education_evaluation = education_evaluation(u32::from(ats_score) + EDUCATION_LENIENCY);

        let formatting_issues = formatting_issues(ats_score);
        let improvement_recommendations = recommendations(&missing, ats_score, !formatting_issues.is_empty());

        info!(
            "Analysis of '{}': score {} ({}), {}/{} skills matched",
            resume_label,
            ats_score,
            score_category,
            matched.len(),
            job_skills.len()
        );

        AnalysisResult {
            ats_score,
            score_category,
            skill_match: SkillMatch {
                matched,
                missing,
                synonym_matches,
            },
            experience_evaluation,
            education_evaluation,
            formatting_issues,
            improvement_recommendations,
        }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn synonyms(&self) -> &SynonymTable {
        self.synonym_matcher.table()
    }

    pub fn jitter_spread(&self) -> f64 {
        self.jitter_spread
    }
}

/// Analyze with the default tables and thread-local randomness
pub fn perform_analysis(resume_label: &str, job_description: &str) -> Result<AnalysisResult> {
    let engine = AnalysisEngine::new()?;
    let mut jitter = RandomJitter::thread_local();
    Ok(engine.perform_analysis(resume_label, job_description, &mut jitter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::feedback::USE_ACTION_VERBS;
    use crate::processing::scorer::{FixedJitter, MAX_JITTER_SPREAD};

    const JOB_TEXT: &str =
        "We are hiring an engineer to build browser apps in JavaScript and ship them with Docker containers daily.";

    #[test]
    fn test_synthetic_resume_body_lists_leading_skills() {
        let engine = AnalysisEngine::new().unwrap();
        let body = engine.synthetic_resume_body();
        assert!(body.contains(
            "Software Engineer with experience in JavaScript, TypeScript, React, Node.js, Python, Java, C++, HTML."
        ));
        assert!(body.contains("Strong problem-solving and communication skills."));
    }

    #[test]
    fn test_matched_and_missing_partition_job_skills() {
        let engine = AnalysisEngine::new().unwrap();
        let result = engine.perform_analysis("resume.pdf", JOB_TEXT, &mut FixedJitter(0.0));

        assert_eq!(result.skill_match.matched, vec!["JavaScript", "Java"]);
        assert_eq!(result.skill_match.missing, vec!["Docker"]);
        assert_eq!(result.skill_match.synonym_matches, vec!["JS matched with JavaScript"]);
    }

    #[test]
    fn test_deterministic_pipeline_with_fixed_jitter() {
        let engine = AnalysisEngine::new().unwrap();
        let result = engine.perform_analysis("resume.pdf", JOB_TEXT, &mut FixedJitter(0.0));

        assert_eq!(result.ats_score, 67);
        assert_eq!(result.score_category, ScoreCategory::ModerateMatch);
        assert_eq!(result.experience_evaluation, ExperienceEvaluation::PartiallyRelevant);
        assert_eq!(result.education_evaluation, EducationEvaluation::PartiallyMeets);
        assert_eq!(result.formatting_issues.len(), 2);
        assert_eq!(result.improvement_recommendations.len(), 7);
        assert_eq!(result.improvement_recommendations[0], "Add relevant experience with: Docker");
        assert_eq!(result.improvement_recommendations.last().unwrap(), USE_ACTION_VERBS);
    }

    #[test]
    fn test_education_is_more_lenient() {
        let engine = AnalysisEngine::new().unwrap();
        // 2 of 3 skills plus 5 gives 72; education sees 77
        let result = engine.perform_analysis("resume.pdf", JOB_TEXT, &mut FixedJitter(5.0));
        assert_eq!(result.ats_score, 72);
        assert_eq!(result.experience_evaluation, ExperienceEvaluation::PartiallyRelevant);
        assert_eq!(result.education_evaluation, EducationEvaluation::MeetsRequirements);

        // 4 of 7 skills gives 57; education sees 62
        let job = "Needs React and Python and Docker and Git and Kubernetes and HTML and TypeScript";
        let result = engine.perform_analysis("resume.docx", job, &mut FixedJitter(0.0));
        assert_eq!(result.ats_score, 57);
        assert_eq!(result.experience_evaluation, ExperienceEvaluation::NotRelevant);
        assert_eq!(result.education_evaluation, EducationEvaluation::PartiallyMeets);
    }

    #[test]
    fn test_empty_job_description_is_neutral() {
        let engine = AnalysisEngine::new().unwrap();
        let result = engine.perform_analysis("resume.pdf", "", &mut RandomJitter::thread_local());

        assert_eq!(result.ats_score, 75);
        assert_eq!(result.score_category, ScoreCategory::GoodMatch);
        assert!(result.skill_match.matched.is_empty());
        assert!(result.skill_match.missing.is_empty());
        assert!(result.skill_match.synonym_matches.is_empty());
        assert_eq!(result.education_evaluation, EducationEvaluation::MeetsRequirements);
        assert_eq!(result.formatting_issues.len(), 1);
        assert_eq!(result.improvement_recommendations.len(), 4);
    }

    #[test]
    fn test_result_serializes_with_camel_case_fields() {
        let engine = AnalysisEngine::new().unwrap();
        let result = engine.perform_analysis("resume.pdf", JOB_TEXT, &mut FixedJitter(0.0));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["atsScore"], 67);
        assert_eq!(json["scoreCategory"], "Moderate match");
        assert_eq!(json["skillMatch"]["missing"][0], "Docker");
        assert!(json["skillMatch"]["synonymMatches"].is_array());
        assert_eq!(json["educationEvaluation"], "Partially Meets");
    }

    #[test]
    fn test_convenience_function_uses_random_jitter() {
        let result = perform_analysis("resume.pdf", JOB_TEXT).unwrap();
        assert!((62..=72).contains(&result.ats_score));
    }

    #[test]
    fn test_jitter_spread_is_bounded() {
        let engine = AnalysisEngine::new().unwrap();
        assert_eq!(engine.jitter_spread(), DEFAULT_JITTER_SPREAD);

        for (requested, expected) in [
            (f64::INFINITY, MAX_JITTER_SPREAD),
            (1.0e308, MAX_JITTER_SPREAD),
            (-3.0, 0.0),
            (f64::NAN, 0.0),
            (12.5, 12.5),
        ] {
            let engine = AnalysisEngine::new().unwrap().with_jitter_spread(requested);
            assert_eq!(engine.jitter_spread(), expected);

            let result = engine.perform_analysis("resume.pdf", JOB_TEXT, &mut RandomJitter::seeded(1));
            assert!(result.ats_score <= 100);
        }
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalysisEngine>();
    }
}
