//! Resume analyzer: heuristic resume and job description compatibility tool

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, JobSource};
use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::input::InputManager;
use resume_analyzer::output::formatter::{save_report_to_file, suggest_filename};
use resume_analyzer::output::{AnalysisReport, ReportGenerator};
use resume_analyzer::processing::analyzer::AnalysisEngine;
use resume_analyzer::processing::scorer::{Jitter, RandomJitter};
use resume_analyzer::processing::vocabulary::{SkillVocabulary, SynonymTable};
use resume_analyzer::session::AnalysisSession;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_result = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config_result {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, cli.config, config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config_path: Option<PathBuf>, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            detailed,
            output,
            save,
            seed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };
            let seed = seed.or(config.scoring.seed);

            let engine = build_engine(&config).context("Failed to initialise analysis engine")?;
            let mut input_manager = InputManager::new();
            let mut session = AnalysisSession::new(config.validation.clone());

            let resume_file = input_manager
                .inspect_resume(&resume, &config.validation)
                .await
                .with_context(|| format!("Resume rejected: {}", resume.display()))?;
            session.select_resume(resume_file)?;

            let (job_text, job_source) = load_job_description(&mut input_manager, job).await?;
            session.set_job_description(job_text);

            let issues = session.validation_issues();
            if !issues.is_empty() {
                anyhow::bail!("Cannot analyze yet: {}", issues.join("; "));
            }

            let spinner = start_spinner(config.ui.show_progress && output_format == OutputFormat::Console);
            if config.ui.simulated_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(config.ui.simulated_delay_ms)).await;
            }

            let mut jitter: Box<dyn Jitter> = match seed {
                Some(seed) => Box::new(RandomJitter::seeded(seed)),
                None => Box::new(RandomJitter::thread_local()),
            };
            let result = session.analyze(&engine, jitter.as_mut())?.clone();
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            let resume_label = session.resume().map(|r| r.name.clone()).unwrap_or_default();
            let report = AnalysisReport::new(result, resume_label.clone(), job_source).with_seed(seed);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                config.output.pretty_json,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, &resume_label, true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    info!("Report saved to {}", path.display());
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Skills { synonyms } => {
            let engine = build_engine(&config)?;

            println!("📚 Skill vocabulary ({} skills)\n", engine.vocabulary().len());
            for (i, skill) in engine.vocabulary().skills().iter().enumerate() {
                println!("  {:>2}. {}", i + 1, skill);
            }

            if synonyms {
                println!("\n🔗 Synonyms\n");
                for entry in engine.synonyms().entries() {
                    println!("  • {}: {}", entry.term, entry.synonyms.join(", "));
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("{}", toml::to_string_pretty(&config)?);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn build_engine(config: &Config) -> resume_analyzer::Result<AnalysisEngine> {
    let vocabulary = SkillVocabulary::default().with_additional_skills(&config.vocabulary.additional_skills);
    let synonyms = SynonymTable::default().with_additional_synonyms(config.vocabulary.additional_synonyms.clone());

    Ok(AnalysisEngine::with_tables(vocabulary, synonyms)?.with_jitter_spread(config.scoring.jitter_spread))
}

async fn load_job_description(input_manager: &mut InputManager, job: JobSource) -> anyhow::Result<(String, String)> {
    match (job.job, job.job_text) {
        (Some(path), _) => {
            let text = input_manager
                .extract_text(&path)
                .await
                .with_context(|| format!("Failed to read job description: {}", path.display()))?;
            Ok((text, path.display().to_string()))
        }
        (None, Some(text)) => Ok((text, "inline".to_string())),
        (None, None) => anyhow::bail!("A job description is required (--job or --job-text)"),
    }
}

fn start_spinner(enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Analyzing resume...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}
