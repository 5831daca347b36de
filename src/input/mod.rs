//! Input handling module
//! Resume file gating, job description loading and file type detection

pub mod file_detector;
pub mod manager;
pub mod text_extractor;
pub mod validation;

pub use manager::{InputManager, ResumeFile};
