//! Resume analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod session;

pub use config::Config;
pub use error::{Result, ResumeAnalyzerError};
pub use processing::analyzer::{perform_analysis, AnalysisEngine, AnalysisResult, SkillMatch};
pub use session::AnalysisSession;
