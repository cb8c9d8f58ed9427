//! Embedding collaborator backed by a local Model2Vec model
//!
//! Static embeddings are fast enough to run inline per scoring call, so no
//! caching layer is needed here. The model directory is supplied by the
//! caller (CLI flag or config); loading failure surfaces at construction
//! time, never during scoring.

use crate::error::{FitScorerError, Result};
use crate::semantic::{Collaborator, ExtractedCriteria};
use model2vec_rs::model::StaticModel;
use std::path::{Path, PathBuf};

pub struct Model2VecCollaborator {
    model: StaticModel,
    model_dir: PathBuf,
}

impl Model2VecCollaborator {
    /// Load a Model2Vec model from a local directory.
    pub fn load(model_dir: &Path) -> Result<Self> {
        log::info!("Loading embedding model from {}", model_dir.display());
        let model = StaticModel::from_pretrained(model_dir, None, None, None)?;
        Ok(Self {
            model,
            model_dir: model_dir.to_path_buf(),
        })
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }
}

impl Collaborator for Model2VecCollaborator {
    fn is_available(&self) -> bool {
        true
    }

    /// Criteria extraction needs a generative model; a static embedding
    /// model cannot provide it. The scorer treats this as "capability
    /// missing" and keeps its heuristic buckets.
    async fn extract_criteria(&self, _jd_text: &str) -> Result<ExtractedCriteria> {
        Err(FitScorerError::Collaborator(
            "embedding collaborator does not extract criteria".to_string(),
        ))
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.model.encode_single(text);
        if embedding.is_empty() {
            return Err(FitScorerError::Collaborator(
                "embedding model returned an empty vector".to_string(),
            ));
        }
        Ok(embedding)
    }
}
