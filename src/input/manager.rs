//! Input manager for resume selection and job description loading

use crate::config::ValidationConfig;
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use crate::input::validation::{format_file_size, validate_resume_file};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A selected resume: only its identity is kept, the contents are never read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFile {
    pub name: String,
    pub size_bytes: u64,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    pub fn display_size(&self) -> String {
        format_file_size(self.size_bytes)
    }
}

pub struct InputManager {
    cache: HashMap<String, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Look up a resume on disk and apply the file gating rules
    pub async fn inspect_resume(&self, path: &Path, limits: &ValidationConfig) -> Result<ResumeFile> {
        // Only metadata is read; the document itself is never opened
        let metadata = tokio::fs::metadata(path).await.map_err(|_| {
            ResumeAnalyzerError::InvalidInput(format!("File does not exist: {}", path.display()))
        })?;

        if !metadata.is_file() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ResumeAnalyzerError::InvalidInput(format!("Invalid file path: {}", path.display())))?;

        validate_resume_file(&name, metadata.len(), limits)?;

        let resume = ResumeFile::new(name, metadata.len());
        info!("Selected resume: {} ({})", resume.name, resume.display_size());
        Ok(resume)
    }

    /// Read a job description from a plain text or markdown file
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        // Check cache first
        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let file_type = self.detect_file_type(path)?;

        // Only plain text and markdown carry job descriptions
        let text = match file_type {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Pdf | FileType::Docx | FileType::Unknown => {
                return Err(ResumeAnalyzerError::UnsupportedFormat(
                    format!("Job descriptions must be .txt or .md files: {}", path.display())
                ));
            }
        };

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ResumeAnalyzerError::InvalidInput(
                format!("File has no extension: {}", path.display())
            ))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
