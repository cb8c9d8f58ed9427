//! CLI interface for the fit scorer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fit-scorer")]
#[command(about = "Score how well candidate notes align with a job description")]
#[command(
    long_about = "Deterministic JD \u{2194} candidate fit scoring: phrase extraction, \
                  must/nice/general bucketing, fragment-level matching, and weighted \
                  aggregation, with optional embedding-based enhancement"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a job description against candidate notes
    Score {
        /// Path to the job description file (TXT, MD, PDF)
        #[arg(short, long)]
        job: PathBuf,

        /// Path to the candidate notes file (TXT, MD, PDF)
        #[arg(long)]
        candidate: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file instead of stdout
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Local Model2Vec model directory for semantic enhancement
        #[arg(long)]
        semantic_model: Option<PathBuf>,

        /// Show every matched and missing phrase
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

pub fn parse_output_format(value: &str) -> Result<OutputFormat, String> {
    match value.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        other => Err(format!(
            "Unknown output format '{}'. Expected console, json, or markdown",
            other
        )),
    }
}

pub fn validate_file_extension(path: &Path, allowed: &[&str]) -> Result<(), String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| format!("{} has no file extension", path.display()))?;

    if allowed.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "{} has unsupported extension '{}'. Expected one of: {}",
            path.display(),
            extension,
            allowed.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("console").unwrap(), OutputFormat::Console);
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("jd.txt"), &["txt", "md", "pdf"]).is_ok());
        assert!(validate_file_extension(Path::new("jd.docx"), &["txt", "md", "pdf"]).is_err());
        assert!(validate_file_extension(Path::new("jd"), &["txt"]).is_err());
    }

    #[test]
    fn test_cli_parses_score_command() {
        let cli = Cli::try_parse_from([
            "fit-scorer",
            "score",
            "--job",
            "jd.txt",
            "--candidate",
            "notes.txt",
            "--detailed",
        ])
        .unwrap();
        match cli.command {
            Commands::Score { job, candidate, detailed, .. } => {
                assert_eq!(job, PathBuf::from("jd.txt"));
                assert_eq!(candidate, PathBuf::from("notes.txt"));
                assert!(detailed);
            }
            _ => panic!("expected score command"),
        }
    }
}
