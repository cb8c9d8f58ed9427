//! Report envelope around a score result

use crate::processing::scorer::ScoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A `ScoreResult` plus the context a saved report needs: where the inputs
/// came from and when the scoring ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub generated_at: DateTime<Utc>,
    pub job_source: String,
    pub candidate_source: String,
    pub result: ScoreResult,
}

impl ScoreReport {
    pub fn new(job_source: String, candidate_source: String, result: ScoreResult) -> Self {
        Self {
            generated_at: Utc::now(),
            job_source,
            candidate_source,
            result,
        }
    }
}
