//! Vocabulary-driven skill extraction

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::vocabulary::SkillVocabulary;
use aho_corasick::{AhoCorasick, MatchKind};

/// Finds which vocabulary skills occur in a piece of text.
///
/// Matching is plain case-insensitive substring containment: no word boundaries and
/// no fuzzy matching, so "Java" is also reported for text mentioning "JavaScript".
pub struct SkillExtractor {
    matcher: AhoCorasick,
    skills: Vec<String>,
}

impl SkillExtractor {
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self> {
        let skills = vocabulary.skills().to_vec();
        let patterns: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();

        // Standard semantics are required for overlapping search
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| ResumeAnalyzerError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { matcher, skills })
    }

    /// Skills present in `text`, in vocabulary order
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let lower_text = text.to_lowercase();
        let mut found = vec![false; self.skills.len()];

        for mat in self.matcher.find_overlapping_iter(&lower_text) {
            found[mat.pattern().as_usize()] = true;
        }

        self.skills
            .iter()
            .zip(found)
            .filter_map(|(skill, hit)| hit.then(|| skill.clone()))
            .collect()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(&SkillVocabulary::default()).unwrap()
    }

    #[test]
    fn test_case_insensitive_extraction() {
        let skills = extractor().extract_skills("I know PYTHON and java");
        assert_eq!(skills, vec!["Python", "Java"]);
    }

    #[test]
    fn test_substring_match_without_word_boundaries() {
        let skills = extractor().extract_skills("Senior JavaScript developer");
        assert_eq!(skills, vec!["JavaScript", "Java"]);
    }

    #[test]
    fn test_results_follow_vocabulary_order_without_duplicates() {
        let text = "docker docker Docker, then React and react again, plus SQL via PostgreSQL";
        let skills = extractor().extract_skills(text);
        assert_eq!(skills, vec!["React", "SQL", "Docker", "PostgreSQL"]);
    }

    #[test]
    fn test_multi_word_and_symbol_terms() {
        let skills = extractor().extract_skills("Built CI/CD with Spring Boot and C++ services, REST API design");
        assert!(skills.contains(&"CI/CD".to_string()));
        assert!(skills.contains(&"Spring Boot".to_string()));
        assert!(skills.contains(&"C++".to_string()));
        assert!(skills.contains(&"REST API".to_string()));
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(extractor().extract_skills("").is_empty());
        assert_eq!(extractor().skill_count(), 37);
    }

    #[test]
    fn test_results_are_subset_of_vocabulary() {
        let vocabulary = SkillVocabulary::default();
        let text = "Agile Scrum teams using Git, Jest, Cypress and Kubernetes on Azure and AWS";
        for skill in extractor().extract_skills(text) {
            assert!(vocabulary.contains(&skill));
        }
    }
}
