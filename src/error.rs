//! Error handling for the fit scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, FitScorerError>;

/// Convert anyhow errors (surfaced by the embedding collaborator) to our error type
impl From<anyhow::Error> for FitScorerError {
    fn from(err: anyhow::Error) -> Self {
        FitScorerError::Collaborator(err.to_string())
    }
}
