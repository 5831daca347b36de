//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::scorer::{DEFAULT_JITTER_SPREAD, MAX_JITTER_SPREAD};
use crate::processing::vocabulary::SynonymEntry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub validation: ValidationConfig,
    pub scoring: ScoringConfig,
    pub vocabulary: VocabularyConfig,
    pub output: OutputConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub max_file_size_bytes: u64,
    pub min_job_description_length: usize,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Half-width of the random score perturbation
    pub jitter_spread: f64,
    /// Fixed seed for reproducible scores
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub additional_skills: Vec<String>,
    pub additional_synonyms: Vec<SynonymEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Cosmetic pause before results are shown
    pub simulated_delay_ms: u64,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 5 * 1024 * 1024,
            min_job_description_length: 50,
            allowed_extensions: vec!["pdf".to_string(), "docx".to_string()],
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            jitter_spread: DEFAULT_JITTER_SPREAD,
            seed: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: 0,
            show_progress: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.validation.allowed_extensions.is_empty() {
            return Err(ResumeAnalyzerError::Configuration(
                "validation.allowed_extensions must not be empty".to_string(),
            ));
        }
        if !(0.0..=MAX_JITTER_SPREAD).contains(&self.scoring.jitter_spread) {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "scoring.jitter_spread must be between 0 and {}, got {}",
                MAX_JITTER_SPREAD, self.scoring.jitter_spread
            )));
        }
        Ok(())
    }
}
