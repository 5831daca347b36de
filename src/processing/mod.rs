//! Skill matching and scoring engine

pub mod vocabulary;
pub mod skill_extractor;
pub mod synonyms;
pub mod scorer;
pub mod feedback;
pub mod analyzer;
