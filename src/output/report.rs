//! Report structure wrapping an analysis result with generation metadata

use crate::processing::analyzer::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Resume file name or identifier
    pub resume_label: String,
    /// Where the job description came from (a path or "inline")
    pub job_source: String,
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    /// Seed used for the score perturbation, when reproducible
    pub seed: Option<u64>,
}

impl AnalysisReport {
    pub fn new(result: AnalysisResult, resume_label: impl Into<String>, job_source: impl Into<String>) -> Self {
        Self {
            result,
            metadata: ReportMetadata {
                resume_label: resume_label.into(),
                job_source: job_source.into(),
                generated_at: Utc::now(),
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                seed: None,
            },
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.metadata.seed = seed;
        self
    }
}
