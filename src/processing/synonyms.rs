//! Cross-referencing of alternate skill spellings between resume and job text

use crate::processing::vocabulary::SynonymTable;

/// Cross-checks resume and job description text against a synonym table
pub struct SynonymMatcher {
    table: SynonymTable,
}

impl SynonymMatcher {
    pub fn new(table: SynonymTable) -> Self {
        Self { table }
    }

    /// Describe every terminology cross-match between the two texts.
    ///
    /// For each table entry, in order, two independent checks run:
    /// a synonym in the resume against the canonical term in the job text, and the
    /// canonical term in the resume against a synonym in the job text. Each check
    /// reports only the first synonym that satisfies it.
    pub fn find_synonym_matches(&self, resume_text: &str, job_text: &str) -> Vec<String> {
        let lower_resume = resume_text.to_lowercase();
        let lower_job = job_text.to_lowercase();
        let mut matches = Vec::new();

        for entry in self.table.entries() {
            let term = entry.term.to_lowercase();
            let term_in_job = lower_job.contains(&term);
            let term_in_resume = lower_resume.contains(&term);

            if term_in_job {
                if let Some(synonym) = entry
                    .synonyms
                    .iter()
                    .find(|s| lower_resume.contains(&s.to_lowercase()))
                {
                    matches.push(format!("{} matched with {}", synonym, entry.term));
                }
            }

            if term_in_resume {
                if let Some(synonym) = entry
                    .synonyms
                    .iter()
                    .find(|s| lower_job.contains(&s.to_lowercase()))
                {
                    matches.push(format!("{} matched with {}", entry.term, synonym));
                }
            }
        }

        matches
    }

    pub fn table(&self) -> &SynonymTable {
        &self.table
    }
}

impl Default for SynonymMatcher {
    fn default() -> Self {
        Self::new(SynonymTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::vocabulary::SynonymEntry;

    #[test]
    fn test_synonym_in_resume_matches_term_in_job() {
        let matcher = SynonymMatcher::default();
        let matches = matcher.find_synonym_matches(
            "Node developer. Node everywhere, Node all day.",
            "Looking for Node.js engineers",
        );

        assert_eq!(
            matches.iter().filter(|m| *m == "Node matched with Node.js").count(),
            1
        );
    }

    #[test]
    fn test_term_in_resume_matches_synonym_in_job() {
        let matcher = SynonymMatcher::default();
        let matches = matcher.find_synonym_matches("Expert in TypeScript", "Strong TS skills");
        assert!(matches.contains(&"TypeScript matched with TS".to_string()));
    }

    #[test]
    fn test_both_directions_can_fire_for_one_entry() {
        let table = SynonymTable::new(vec![SynonymEntry {
            term: "Kubernetes".to_string(),
            synonyms: vec!["K8s".to_string()],
        }]);
        let matcher = SynonymMatcher::new(table);

        let matches = matcher.find_synonym_matches(
            "Ran Kubernetes clusters, also known as K8s",
            "Kubernetes (K8s) administration",
        );

        assert_eq!(
            matches,
            vec!["K8s matched with Kubernetes", "Kubernetes matched with K8s"]
        );
    }

    #[test]
    fn test_first_synonym_wins() {
        let matcher = SynonymMatcher::default();
        let matches = matcher.find_synonym_matches("Wrote ES6 and ECMAScript modules", "JavaScript role");
        assert_eq!(matches, vec!["ECMAScript matched with JavaScript"]);
    }

    #[test]
    fn test_no_matches_for_unrelated_text() {
        let matcher = SynonymMatcher::default();
        assert!(matcher.find_synonym_matches("", "").is_empty());
        assert!(matcher
            .find_synonym_matches("Carpentry and woodwork", "Plumbing apprentice wanted")
            .is_empty());
    }
}
