//! Fit scorer: deterministic JD and candidate alignment scoring

mod cli;
mod config;
mod error;
mod input;
mod output;
mod processing;
mod semantic;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{FitScorerError, Result};
use input::SourceReader;
use log::{error, info};
use output::{ReportGenerator, ScoreReport};
use processing::scorer::FitScorer;
use semantic::Model2VecCollaborator;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Score {
            job,
            candidate,
            output,
            save,
            semantic_model,
            detailed,
        } => {
            cli::validate_file_extension(&job, &["txt", "md", "markdown", "pdf"])
                .map_err(|e| FitScorerError::InvalidInput(format!("Job description file: {}", e)))?;
            cli::validate_file_extension(&candidate, &["txt", "md", "markdown", "pdf"])
                .map_err(|e| FitScorerError::InvalidInput(format!("Candidate notes file: {}", e)))?;

            let output_format = cli::parse_output_format(&output).map_err(FitScorerError::InvalidInput)?;

            info!("Scoring {} against {}", candidate.display(), job.display());

            let mut reader = SourceReader::new();
            let jd_text = reader.read(&job).await?;
            let candidate_text = reader.read(&candidate).await?;

            let scorer = FitScorer::with_config(&config)?;

            let model_dir = semantic_model.or_else(|| config.semantic.model_dir.clone());
            let result = match model_dir {
                Some(dir) => match Model2VecCollaborator::load(&dir) {
                    Ok(collaborator) => {
                        scorer
                            .score_with_collaborator(&jd_text, &candidate_text, &collaborator)
                            .await
                    }
                    Err(e) => {
                        // enhancement only; scoring proceeds without it
                        log::warn!("Embedding model unavailable ({}), using heuristic mode", e);
                        scorer.score(&jd_text, &candidate_text)
                    }
                },
                None => scorer.score(&jd_text, &candidate_text),
            };

            let report = ScoreReport::new(
                job.display().to_string(),
                candidate.display().to_string(),
                result,
            );

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::new(use_colors, detailed || config.output.detailed);
            let rendered = generator.format(&report, output_format)?;

            match save {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    FitScorerError::Configuration(format!("Failed to render config: {}", e))
                })?;
                println!("{}", rendered);
            }
            ConfigAction::Path => {
                println!("{}", Config::config_path().display());
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}
