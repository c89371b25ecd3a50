//! Embedding providers.
//!
//! The ranker only needs one number per section: the cosine similarity
//! between the section text and the query. Anything that turns strings into
//! fixed-length vectors can supply it by implementing [`EmbeddingProvider`].
//! A provider is constructed once per run and passed to the pipeline
//! explicitly; it is only read after construction.
//!
//! [`SentenceEmbedder`] (feature `fastembed`, on by default) runs a
//! sentence-transformer model locally. [`HashingEmbedder`] is a stub for
//! tests and offline runs.

mod hashing;
#[cfg(feature = "fastembed")]
mod sentence;

pub use hashing::{HashingEmbedder, DEFAULT_EMBEDDING_DIM};
#[cfg(feature = "fastembed")]
pub use sentence::SentenceEmbedder;

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Sentence-transformer model loaded by default.
pub const DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Which embedding provider a pipeline builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddingBackend {
    /// A sentence-embedding model run locally through fastembed
    Model {
        /// Model name or fastembed model code
        name: String,
        /// Where model weights are cached
        cache_dir: Option<PathBuf>,
    },
    /// The offline hashing stub; no model files, lexical overlap only
    Hashing,
}

impl EmbeddingBackend {
    /// A model backend with the default cache location.
    pub fn model(name: impl Into<String>) -> Self {
        EmbeddingBackend::Model {
            name: name.into(),
            cache_dir: None,
        }
    }

    /// Construct the provider. Loading a model can fail (unknown name,
    /// download or runtime errors).
    pub fn build(&self) -> Result<Arc<dyn EmbeddingProvider>> {
        match self {
            EmbeddingBackend::Model { name, cache_dir } => load_model(name, cache_dir.clone()),
            EmbeddingBackend::Hashing => Ok(Arc::new(HashingEmbedder::default())),
        }
    }
}

impl Default for EmbeddingBackend {
    fn default() -> Self {
        Self::model(DEFAULT_MODEL)
    }
}

#[cfg(feature = "fastembed")]
fn load_model(name: &str, cache_dir: Option<PathBuf>) -> Result<Arc<dyn EmbeddingProvider>> {
    Ok(Arc::new(SentenceEmbedder::load(name, cache_dir)?))
}

#[cfg(not(feature = "fastembed"))]
fn load_model(name: &str, _cache_dir: Option<PathBuf>) -> Result<Arc<dyn EmbeddingProvider>> {
    Err(Error::Embedding(format!(
        "cannot load {}: built without the `fastembed` feature",
        name
    )))
}

/// Turns text into fixed-length vectors.
pub trait EmbeddingProvider: Send + Sync {
    /// Length of every vector this provider returns.
    fn dimension(&self) -> usize;

    /// Embed a batch of strings, one vector per input, in input order.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single string.
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text])?
            .pop()
            .ok_or_else(|| Error::Embedding("provider returned no vector".into()))
    }

    /// Cosine similarity between two vectors produced by this provider.
    fn cosine_similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        cosine_similarity(a, b)
    }
}

/// Cosine similarity of two vectors.
///
/// Returns 0.0 when either vector has zero norm or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Similarity of every text to the query, aligned with `texts`.
///
/// Embeds the query once and the texts as one batch. An empty `texts`
/// slice returns an empty vector without calling the provider.
pub fn similarities<E>(provider: &E, query: &str, texts: &[&str]) -> Result<Vec<f32>>
where
    E: EmbeddingProvider + ?Sized,
{
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    let query_vec = provider.embed_one(query)?;
    let vectors = provider.embed(texts)?;
    if vectors.len() != texts.len() {
        return Err(Error::Embedding(format!(
            "expected {} vectors, provider returned {}",
            texts.len(),
            vectors.len()
        )));
    }

    Ok(vectors
        .iter()
        .map(|v| provider.cosine_similarity(&query_vec, v))
        .collect())
}
