//! Skill vocabulary and synonym table used as the matching keys

use log::debug;
use serde::{Deserialize, Serialize};

/// Canonical skill names recognised by the extractor.
const DEFAULT_SKILLS: &[&str] = &[
    "JavaScript", "TypeScript", "React", "Node.js", "Python", "Java", "C++",
    "HTML", "CSS", "SQL", "Git", "Docker", "AWS", "Azure", "Kubernetes",
    "MongoDB", "PostgreSQL", "REST API", "GraphQL", "Agile", "Scrum",
    "CI/CD", "Jenkins", "Testing", "Jest", "Cypress", "Vue.js", "Angular",
    "Express", "Django", "Spring Boot", "Machine Learning", "Data Analysis",
    "Leadership", "Communication", "Problem Solving", "Team Collaboration",
];

const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    ("JavaScript", &["JS", "ECMAScript", "ES6"]),
    ("TypeScript", &["TS"]),
    ("React", &["React.js", "ReactJS"]),
    ("Node.js", &["Node", "NodeJS"]),
    ("Python", &["Py"]),
    ("Frontend", &["Front-end", "Front End", "UI Developer"]),
    ("Backend", &["Back-end", "Back End", "Server-side"]),
    ("Full Stack", &["Full-stack", "Fullstack"]),
    ("Database", &["DB", "Data Storage"]),
    ("DevOps", &["Dev Ops", "Development Operations"]),
];

/// Ordered list of unique canonical skill names.
///
/// Uniqueness is case-insensitive and names are never empty. Iteration order is the
/// insertion order, which keeps extraction results stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillVocabulary {
    skills: Vec<String>,
}

/// One canonical term with its alternate spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub term: String,
    pub synonyms: Vec<String>,
}

/// Ordered mapping from a canonical term to its synonyms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
}

impl SkillVocabulary {
    /// Build a vocabulary from arbitrary names, dropping blanks and case-insensitive repeats
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = Self { skills: Vec::new() };
        for name in names {
            vocabulary.push(name.into());
        }
        vocabulary
    }

    /// Append additional skills after the existing ones
    pub fn with_additional_skills(mut self, additional: &[String]) -> Self {
        for skill in additional {
            if !self.push(skill.clone()) {
                debug!("Ignoring duplicate or empty skill '{}'", skill);
            }
        }
        self
    }

    fn push(&mut self, name: String) -> bool {
        let name = name.trim().to_string();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.skills.push(name);
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        let needle = skill.to_lowercase();
        self.skills.iter().any(|s| s.to_lowercase() == needle)
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// First `count` skills, in vocabulary order
    pub fn leading(&self, count: usize) -> &[String] {
        &self.skills[..count.min(self.skills.len())]
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::from_names(DEFAULT_SKILLS.iter().copied())
    }
}

impl SynonymTable {
    pub fn new(entries: Vec<SynonymEntry>) -> Self {
        let mut table = Self { entries: Vec::new() };
        table.extend(entries);
        table
    }

    /// Merge extra entries into the table.
    ///
    /// Synonyms for a term that already exists are appended to that term's list;
    /// unknown terms are added at the end.
    pub fn with_additional_synonyms(mut self, additional: Vec<SynonymEntry>) -> Self {
        self.extend(additional);
        self
    }

    fn extend(&mut self, entries: Vec<SynonymEntry>) {
        for entry in entries {
            let term = entry.term.trim().to_string();
            if term.is_empty() {
                continue;
            }
            let synonyms = entry
                .synonyms
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());

            let key = term.to_lowercase();
            match self.entries.iter_mut().find(|e| e.term.to_lowercase() == key) {
                Some(existing) => {
                    for synonym in synonyms {
                        let lower = synonym.to_lowercase();
                        if !existing.synonyms.iter().any(|s| s.to_lowercase() == lower) {
                            existing.synonyms.push(synonym);
                        }
                    }
                }
                None => self.entries.push(SynonymEntry {
                    term,
                    synonyms: synonyms.collect(),
                }),
            }
        }
    }

    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_SYNONYMS
                .iter()
                .map(|(term, synonyms)| SynonymEntry {
                    term: term.to_string(),
                    synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = SkillVocabulary::default();
        assert_eq!(vocabulary.len(), 37);
        assert_eq!(
            vocabulary.leading(8),
            ["JavaScript", "TypeScript", "React", "Node.js", "Python", "Java", "C++", "HTML"]
        );
        assert!(vocabulary.contains("docker"));
        assert!(!vocabulary.contains("Rust"));
    }

    #[test]
    fn test_additional_skills_are_appended_without_duplicates() {
        let vocabulary = SkillVocabulary::default().with_additional_skills(&[
            "Rust".to_string(),
            "python".to_string(),
            "   ".to_string(),
        ]);

        assert_eq!(vocabulary.len(), 38);
        assert_eq!(vocabulary.skills().last().map(String::as_str), Some("Rust"));
        assert_eq!(vocabulary.leading(1), ["JavaScript"]);
    }

    #[test]
    fn test_leading_is_bounded() {
        let vocabulary = SkillVocabulary::from_names(["Go", "Rust"]);
        assert_eq!(vocabulary.leading(8).len(), 2);
    }

    #[test]
    fn test_default_synonyms_order() {
        let table = SynonymTable::default();
        assert_eq!(table.len(), 10);
        assert_eq!(table.entries()[0].term, "JavaScript");
        assert_eq!(table.entries()[3].synonyms, vec!["Node", "NodeJS"]);
        assert_eq!(table.entries()[9].term, "DevOps");
    }

    #[test]
    fn test_additional_synonyms_merge_into_existing_terms() {
        let table = SynonymTable::default().with_additional_synonyms(vec![
            SynonymEntry {
                term: "python".to_string(),
                synonyms: vec!["Python3".to_string(), "py".to_string()],
            },
            SynonymEntry {
                term: "Kubernetes".to_string(),
                synonyms: vec!["K8s".to_string()],
            },
        ]);

        assert_eq!(table.len(), 11);
        assert_eq!(table.entries()[4].synonyms, vec!["Py", "Python3"]);
        assert_eq!(table.entries()[10].term, "Kubernetes");
    }
}
