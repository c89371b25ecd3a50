//! Sentence-embedding models run locally through fastembed.
//!
//! Model weights are fetched from the Hugging Face hub on first use and
//! cached; later runs load them from the cache directory.

use std::path::PathBuf;

use ::fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use super::{EmbeddingProvider, DEFAULT_MODEL};
use crate::error::{Error, Result};

/// Embeds text with a sentence-transformer model.
///
/// Loading is the expensive part; build one per run and share it.
pub struct SentenceEmbedder {
    model: TextEmbedding,
    name: String,
    dimension: usize,
}

impl SentenceEmbedder {
    /// Load the default model.
    pub fn new() -> Result<Self> {
        Self::load(DEFAULT_MODEL, None)
    }

    /// Load a model by name, e.g. `"sentence-transformers/all-MiniLM-L6-v2"`,
    /// `"all-MiniLM-L6-v2"` or a fastembed model code.
    pub fn load(name: &str, cache_dir: Option<PathBuf>) -> Result<Self> {
        let (model, code, dimension) = resolve_model(name)?;

        let mut init = InitOptions::new(model).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            init = init.with_cache_dir(dir);
        }

        log::info!("loading embedding model {}", code);
        let model = TextEmbedding::try_new(init)
            .map_err(|e| Error::Embedding(format!("cannot load model {}: {}", code, e)))?;

        Ok(Self {
            model,
            name: code,
            dimension,
        })
    }

    /// Canonical name of the loaded model.
    pub fn model_name(&self) -> &str {
        &self.name
    }
}

impl EmbeddingProvider for SentenceEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| Error::Embedding(e.to_string()))
    }
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field("model", &self.name)
            .field("dimension", &self.dimension)
            .finish()
    }
}

/// Sentence-transformers names, keyed by the part after the last `/`.
const ALIASES: [(&str, EmbeddingModel); 4] = [
    ("all-minilm-l6-v2", EmbeddingModel::AllMiniLML6V2),
    ("all-minilm-l12-v2", EmbeddingModel::AllMiniLML12V2),
    ("bge-small-en-v1.5", EmbeddingModel::BGESmallENV15),
    ("bge-base-en-v1.5", EmbeddingModel::BGEBaseENV15),
];

/// Resolve a model name to a fastembed model, its code and its dimension.
///
/// Sentence-transformers names go through the alias table; anything else
/// must match a fastembed model code exactly (case-insensitive).
fn resolve_model(name: &str) -> Result<(EmbeddingModel, String, usize)> {
    let wanted = name.trim().to_lowercase();
    let short = wanted.rsplit('/').next().unwrap_or(&wanted);
    let alias = ALIASES
        .iter()
        .find(|(alias, _)| *alias == short)
        .map(|(_, model)| model.clone());

    TextEmbedding::list_supported_models()
        .into_iter()
        .find(|info| match &alias {
            Some(model) => info.model == *model,
            None => info.model_code.to_lowercase() == wanted,
        })
        .map(|info| (info.model, info.model_code, info.dim))
        .ok_or_else(|| Error::Embedding(format!("unknown embedding model: {}", name)))
}
