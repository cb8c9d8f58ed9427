//! Optional semantic enhancement behind an external collaborator
//!
//! A collaborator can contribute two things: structured criteria extracted
//! straight from the JD, and embedding vectors for whole-text similarity.
//! Neither is ever required; the deterministic pipeline owns correctness
//! and the scorer falls back to it on any failure.

pub mod embedding;

use crate::error::{FitScorerError, Result};
use serde::{Deserialize, Serialize};

pub use embedding::Model2VecCollaborator;

/// Structured must/nice/general phrase lists extracted by a collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedCriteria {
    pub must: Vec<String>,
    pub nice: Vec<String>,
    pub general: Vec<String>,
}

impl ExtractedCriteria {
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.nice.is_empty() && self.general.is_empty()
    }
}

/// An external embedding/LLM service. Implementations must answer
/// `is_available` cheaply (a capability/credential check); the async calls
/// may fail or hang and the caller bounds them with a timeout.
pub trait Collaborator {
    fn is_available(&self) -> bool;

    fn extract_criteria(
        &self,
        jd_text: &str,
    ) -> impl std::future::Future<Output = Result<ExtractedCriteria>> + Send;

    fn embed(&self, text: &str) -> impl std::future::Future<Output = Result<Vec<f32>>> + Send;
}

/// Default collaborator: never available, forcing the deterministic path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCollaborator;

impl Collaborator for NoopCollaborator {
    fn is_available(&self) -> bool {
        false
    }

    async fn extract_criteria(&self, _jd_text: &str) -> Result<ExtractedCriteria> {
        Err(FitScorerError::Collaborator(
            "no collaborator configured".to_string(),
        ))
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(FitScorerError::Collaborator(
            "no collaborator configured".to_string(),
        ))
    }
}

/// Cosine similarity between two embedding vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(FitScorerError::Collaborator(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![0.3, 0.5, 0.2];
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_dimension_mismatch_is_error() {
        assert!(cosine_similarity(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_cosine_zero_vector() {
        let sim = cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_noop_collaborator_is_unavailable() {
        assert!(!NoopCollaborator.is_available());
    }

    #[tokio::test]
    async fn test_noop_collaborator_calls_fail() {
        assert!(NoopCollaborator.embed("anything").await.is_err());
        assert!(NoopCollaborator.extract_criteria("jd").await.is_err());
    }

    #[test]
    fn test_empty_criteria_detection() {
        assert!(ExtractedCriteria::default().is_empty());
        let criteria = ExtractedCriteria {
            must: vec!["sql".to_string()],
            ..Default::default()
        };
        assert!(!criteria.is_empty());
    }
}
