//! Output formatters for analysis reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use crate::processing::scorer::{EvaluationTier, ScoreBand};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering an analysis report
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Terminal formatter with banded colours
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Standalone HTML page
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Analysis Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 860px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .score { text-align: center; margin-bottom: 24px; }
        .score-value { font-size: 56px; font-weight: bold; }
        .score-strong { color: #10B981; }
        .score-good { color: #2563EB; }
        .score-moderate { color: #F59E0B; }
        .score-low { color: #EF4444; }
        .skill-badge { display: inline-block; padding: 4px 10px; margin: 3px; border-radius: 12px; font-size: 14px; }
        .skill-matched { background: #d1fae5; color: #065f46; }
        .skill-missing { background: #fee2e2; color: #991b1b; }
        .badge-eval { display: inline-block; padding: 4px 12px; border-radius: 12px; font-weight: bold; }
        .eval-exceeds { background: #d1fae5; }
        .eval-meets { background: #dbeafe; }
        .eval-partial { background: #fef3c7; }
        .eval-not-meet { background: #fee2e2; }
        h2 { color: #2563EB; border-bottom: 2px solid #e9ecef; padding-bottom: 8px; }
        .metadata { margin-top: 30px; font-size: 13px; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="score">
            <div class="score-value {{ score_class }}">{{ score }}</div>
            <p class="score-category {{ score_class }}">{{ category }}</p>
        </div>

        <h2>Matched Skills</h2>
        {% if matched.is_empty() %}
        <p>No matching skills found</p>
        {% else %}
        <div>{% for skill in matched %}<span class="skill-badge skill-matched">{{ skill }}</span>{% endfor %}</div>
        {% endif %}

        {% if !missing.is_empty() %}
        <h2>Missing Skills</h2>
        <div>{% for skill in missing %}<span class="skill-badge skill-missing">{{ skill }}</span>{% endfor %}</div>
        {% endif %}

        {% if !synonym_matches.is_empty() %}
        <h2>Synonym Matches</h2>
        <ul>{% for item in synonym_matches %}<li>{{ item }}</li>{% endfor %}</ul>
        {% endif %}

        <h2>Evaluations</h2>
        <p>Experience: <span class="badge-eval {{ experience_class }}">{{ experience }}</span></p>
        <p>Education: <span class="badge-eval {{ education_class }}">{{ education }}</span></p>

        {% if !formatting_issues.is_empty() %}
        <h2>Formatting Issues</h2>
        <ul>{% for issue in formatting_issues %}<li>{{ issue }}</li>{% endfor %}</ul>
        {% endif %}

        <h2>Recommendations</h2>
        <ol>{% for rec in recommendations %}<li>{{ rec }}</li>{% endfor %}</ol>

        <div class="metadata">
            <p>Resume: {{ resume_label }} | Job: {{ job_source }}</p>
            <p>Generated {{ generated_at }} by Resume Analyzer v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    score: u8,
    score_class: &'static str,
    category: String,
    matched: Vec<String>,
    missing: Vec<String>,
    synonym_matches: Vec<String>,
    experience: String,
    experience_class: &'static str,
    education: String,
    education_class: &'static str,
    formatting_issues: Vec<String>,
    recommendations: Vec<String>,
    resume_label: String,
    job_source: String,
    generated_at: String,
    version: String,
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Strong => Color::Green,
        ScoreBand::Good => Color::Blue,
        ScoreBand::Moderate => Color::Yellow,
        ScoreBand::Low => Color::Red,
    }
}

fn format_timestamp(report: &AnalysisReport) -> String {
    report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".color(Color::Blue).bold(), title.bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn format_badge(&self, label: &str, band: ScoreBand) -> String {
        if self.use_colors {
            format!("[{}]", label.color(band_color(band)).bold())
        } else {
            format!("[{}]", label)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let band = result.score_category.band();
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME ANALYSIS"));
        output.push_str(&format!(
            "ATS Score: {} {}\n",
            self.colorize(&format!("{}/100", result.ats_score), band_color(band)),
            self.format_badge(result.score_category.as_str(), band)
        ));

        output.push_str(&self.format_header("✅ Matched Skills"));
        if result.skill_match.matched.is_empty() {
            output.push_str("  No matching skills found\n");
        } else {
            for skill in &result.skill_match.matched {
                output.push_str(&format!("  ✓ {}\n", self.colorize(skill, Color::Green)));
            }
        }

        if !result.skill_match.missing.is_empty() {
            output.push_str(&self.format_header("❌ Missing Skills"));
            for skill in &result.skill_match.missing {
                output.push_str(&format!("  ✗ {}\n", self.colorize(skill, Color::Red)));
            }
        }

        if !result.skill_match.synonym_matches.is_empty() {
            output.push_str(&self.format_header("🔗 Synonym Matches"));
            for item in &result.skill_match.synonym_matches {
                output.push_str(&format!("  • {}\n", item));
            }
        }

        output.push_str(&self.format_header("🎓 Evaluations"));
        output.push_str(&format!(
            "  Experience: {}\n",
            self.format_badge(result.experience_evaluation.as_str(), result.experience_evaluation.band())
        ));
        output.push_str(&format!(
            "  Education:  {}\n",
            self.format_badge(result.education_evaluation.as_str(), result.education_evaluation.band())
        ));

        if !result.formatting_issues.is_empty() {
            output.push_str(&self.format_header("⚠️  Formatting Issues"));
            for issue in &result.formatting_issues {
                output.push_str(&format!("  • {}\n", self.colorize(issue, Color::Yellow)));
            }
        }

        output.push_str(&self.format_header("💡 Recommendations"));
        for (i, rec) in result.improvement_recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, rec));
        }

        if self.detailed {
            output.push_str(&self.format_header("ℹ️  Details"));
            output.push_str(&format!("  Resume: {}\n", report.metadata.resume_label));
            output.push_str(&format!("  Job description: {}\n", report.metadata.job_source));
            output.push_str(&format!("  Generated: {}\n", format_timestamp(report)));
            if let Some(seed) = report.metadata.seed {
                output.push_str(&format!("  Score seed: {}\n", seed));
            }
            output.push_str(&format!(
                "  {}\n",
                self.colorize("Resume content is simulated from the skill vocabulary", Color::BrightBlack)
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn bullet_list(items: &[String]) -> String {
        items.iter().map(|item| format!("- {}\n", item)).collect()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# 📊 Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n",
                report.metadata.resume_label, report.metadata.job_source
            ));
            output.push_str(&format!("**Generated:** {}\n\n", format_timestamp(report)));
        }

        output.push_str(&format!(
            "**ATS Score:** {}/100 ({})\n\n",
            result.ats_score, result.score_category
        ));

        output.push_str("## Skills\n\n");
        output.push_str("| Matched | Missing |\n");
        output.push_str("|---------|---------|\n");
        let rows = result.skill_match.matched.len().max(result.skill_match.missing.len());
        for i in 0..rows {
            output.push_str(&format!(
                "| {} | {} |\n",
                result.skill_match.matched.get(i).map(String::as_str).unwrap_or(""),
                result.skill_match.missing.get(i).map(String::as_str).unwrap_or("")
            ));
        }
        output.push('\n');

        if !result.skill_match.synonym_matches.is_empty() {
            output.push_str("### Synonym Matches\n\n");
            output.push_str(&Self::bullet_list(&result.skill_match.synonym_matches));
            output.push('\n');
        }

        output.push_str("## Evaluations\n\n");
        output.push_str(&format!("- **Experience:** {}\n", result.experience_evaluation));
        output.push_str(&format!("- **Education:** {}\n\n", result.education_evaluation));

        if !result.formatting_issues.is_empty() {
            output.push_str("## ⚠️ Formatting Issues\n\n");
            output.push_str(&Self::bullet_list(&result.formatting_issues));
            output.push('\n');
        }

        output.push_str("## 💡 Recommendations\n\n");
        for (i, rec) in result.improvement_recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, rec));
        }

        if self.include_metadata {
            output.push_str("\n---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Analyzer v{}*\n",
                report.metadata.analyzer_version
            ));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let result = &report.result;

        HtmlTemplate {
            include_styles: self.include_styles,
            score: result.ats_score,
            score_class: result.score_category.band().css_class(),
            category: result.score_category.to_string(),
            matched: result.skill_match.matched.clone(),
            missing: result.skill_match.missing.clone(),
            synonym_matches: result.skill_match.synonym_matches.clone(),
            experience: result.experience_evaluation.to_string(),
            experience_class: EvaluationTier::from_band(result.experience_evaluation.band()).css_class(),
            education: result.education_evaluation.to_string(),
            education_class: EvaluationTier::from_band(result.education_evaluation.band()).css_class(),
            formatting_issues: result.formatting_issues.clone(),
            recommendations: result.improvement_recommendations.clone(),
            resume_label: report.metadata.resume_label.clone(),
            job_source: report.metadata.job_source.clone(),
            generated_at: format_timestamp(report),
            version: report.metadata.analyzer_version.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::scorer::FixedJitter;

    const JOB_TEXT: &str =
        "We are hiring an engineer to build browser apps in JavaScript and ship them with Docker containers daily.";

    fn sample_report() -> AnalysisReport {
        let engine = AnalysisEngine::new().unwrap();
        let result = engine.perform_analysis("jane_doe.pdf", JOB_TEXT, &mut FixedJitter(0.0));
        AnalysisReport::new(result, "jane_doe.pdf", "inline")
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("ATS Score: 67/100 [Moderate match]"));
        assert!(output.contains("✓ JavaScript"));
        assert!(output.contains("✗ Docker"));
        assert!(output.contains("Experience: [Partially Relevant]"));
        assert!(output.contains("Resume: jane_doe.pdf"));
    }

    #[test]
    fn test_json_output_uses_result_field_names() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["result"]["atsScore"], 67);
        assert_eq!(value["result"]["skillMatch"]["matched"][0], "JavaScript");
        assert_eq!(value["metadata"]["resume_label"], "jane_doe.pdf");
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();

        assert!(output.contains("**ATS Score:** 67/100 (Moderate match)"));
        assert!(output.contains("| JavaScript | Docker |"));
        assert!(output.contains("- **Education:** Partially Meets"));
        assert!(output.contains("7. Use action verbs"));
    }

    #[test]
    fn test_html_output_is_escaped_and_styled() {
        let output = HtmlFormatter::new(true).format_report(&sample_report()).unwrap();

        assert!(output.contains("score-moderate"));
        assert!(output.contains("eval-partial"));
        assert!(output.contains("skill-missing\">Docker"));
        assert!(output.contains("JS matched with JavaScript"));
    }

    #[test]
    fn test_generator_dispatches_by_format() {
        let generator = ReportGenerator::with_options(false, false, true, false);
        let report = sample_report();
        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
        let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# "));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Markdown, "/tmp/jane_doe.pdf", false),
            "jane_doe_analysis.md"
        );
        assert!(suggest_filename(&OutputFormat::Html, "cv.docx", true).ends_with(".html"));
    }

    #[test]
    fn test_save_report_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.md");
        save_report_to_file("# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# report");
    }
}
