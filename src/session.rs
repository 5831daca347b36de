//! Caller-owned analysis session state
//!
//! Holds the selected resume, the job description and the last result between
//! analyses. The engine itself stays stateless; everything that outlives a single
//! call lives here.

use crate::config::ValidationConfig;
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::validation::{job_description_shortfall, validate_resume_file};
use crate::input::ResumeFile;
use crate::processing::analyzer::{AnalysisEngine, AnalysisResult};
use crate::processing::scorer::Jitter;
use log::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    limits: ValidationConfig,
    resume: Option<ResumeFile>,
    job_description: String,
    last_result: Option<AnalysisResult>,
}

impl AnalysisSession {
    pub fn new(limits: ValidationConfig) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Select a resume, replacing any previous one.
    ///
    /// A file that fails the gating rules clears the current selection.
    pub fn select_resume(&mut self, resume: ResumeFile) -> Result<()> {
        if let Err(e) = validate_resume_file(&resume.name, resume.size_bytes, &self.limits) {
            warn!("Rejected resume '{}': {}", resume.name, e);
            self.resume = None;
            return Err(e);
        }

        debug!("Resume selected: {}", resume.name);
        self.resume = Some(resume);
        Ok(())
    }

    pub fn clear_resume(&mut self) {
        self.resume = None;
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    /// Outstanding problems preventing an analysis, in display order
    pub fn validation_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.resume.is_none() {
            issues.push("Please upload your resume".to_string());
        }

        if let Some(remaining) = job_description_shortfall(&self.job_description, &self.limits) {
            issues.push(format!("Job description needs at least {} more characters", remaining));
        }

        issues
    }

    pub fn can_analyze(&self) -> bool {
        self.validation_issues().is_empty()
    }

    /// Run the engine on the current inputs and keep the result
    pub fn analyze(&mut self, engine: &AnalysisEngine, jitter: &mut dyn Jitter) -> Result<&AnalysisResult> {
        let issues = self.validation_issues();
        let resume = match (&self.resume, issues.is_empty()) {
            (Some(resume), true) => resume,
            _ => return Err(ResumeAnalyzerError::InvalidInput(issues.join("; "))),
        };

        let result = engine.perform_analysis(&resume.name, &self.job_description, jitter);
        Ok(self.last_result.insert(result))
    }

    /// Drop the selection, the job text and any previous result
    pub fn reset(&mut self) {
        self.resume = None;
        self.job_description.clear();
        self.last_result = None;
    }

    pub fn resume(&self) -> Option<&ResumeFile> {
        self.resume.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }
}
