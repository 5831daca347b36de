//! Text extraction for job description files

use crate::error::{Result, ResumeAnalyzerError};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(ResumeAnalyzerError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(ResumeAnalyzerError::Io)?;
        Ok(self.markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    /// Render markdown and strip the markup, keeping one line per block
    pub fn markdown_to_text(&self, markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }

    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ");

        let clean_text = HTML_TAG.replace_all(&text, "");

        // Entities are decoded after tag removal so escaped angle brackets survive
        let decoded = clean_text
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = decoded
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_is_flattened() {
        let markdown = "## Requirements\n\n- **Docker** & Kubernetes\n- C++ templates like `Vec<T>`\n";
        let text = MarkdownExtractor.markdown_to_text(markdown);

        assert!(text.contains("Requirements"));
        assert!(text.contains("Docker & Kubernetes"));
        assert!(text.contains("Vec<T>"));
        assert!(!text.contains("**"));
        assert!(!text.contains("##"));
        assert!(!text.contains("<li>"));
    }

    #[test]
    fn test_tag_pattern_is_reused_across_calls() {
        let first = MarkdownExtractor.markdown_to_text("<em>Rust</em> and **Go**");
        let second = MarkdownExtractor.markdown_to_text("# Kotlin\n\n<span>Swift</span>");

        assert_eq!(first, "Rust and Go");
        assert_eq!(second, "Kotlin\nSwift");
    }
}
