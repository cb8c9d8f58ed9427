//! Fit scorer library
//!
//! Deterministic JD ↔ candidate alignment scoring with optional
//! collaborator-backed semantic enhancement.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod semantic;

pub use config::Config;
pub use error::{FitScorerError, Result};
pub use processing::scorer::{
    score_jd_and_candidate, FitScorer, ScoreMode, ScoreResult, Verdict,
};
pub use semantic::{Collaborator, NoopCollaborator};
