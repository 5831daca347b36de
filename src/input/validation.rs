//! Input gating rules applied before an analysis is allowed to run

use crate::config::ValidationConfig;
use crate::error::{Result, ResumeAnalyzerError};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Check a resume file's name and size against the configured limits
pub fn validate_resume_file(file_name: &str, size_bytes: u64, limits: &ValidationConfig) -> Result<()> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if !limits.allowed_extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&extension)) {
        return Err(ResumeAnalyzerError::InvalidResumeFile(format!(
            "Invalid file type. Please upload a {} file.",
            describe_extensions(&limits.allowed_extensions)
        )));
    }

    if size_bytes > limits.max_file_size_bytes {
        return Err(ResumeAnalyzerError::InvalidResumeFile(format!(
            "File size exceeds {} limit. Please upload a smaller file.",
            describe_size_limit(limits.max_file_size_bytes)
        )));
    }

    Ok(())
}

/// Characters still missing before the job description is long enough, if any
pub fn job_description_shortfall(job_description: &str, limits: &ValidationConfig) -> Option<usize> {
    let length = job_description.chars().count();
    (length < limits.min_job_description_length).then(|| limits.min_job_description_length - length)
}

/// Human-readable file size: bytes, then KB and MB with one decimal
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

fn describe_extensions(extensions: &[String]) -> String {
    let upper: Vec<String> = extensions.iter().map(|e| e.to_uppercase()).collect();
    match upper.split_last() {
        None => "supported".to_string(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

fn describe_size_limit(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format_file_size(bytes)
    }
}
