//! Feature-hashing bag-of-words embedder.
//!
//! Test and offline stub. Lowercased word unigrams and adjacent-word
//! bigrams are hashed into a fixed number of buckets with a sign bit, then
//! the vector is L2 normalised. It only sees lexical overlap, so rankings
//! are much coarser than with a sentence model. Hashes come from std's
//! `DefaultHasher`: vectors are stable within one build, not across Rust
//! releases.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::EmbeddingProvider;
use crate::error::{Error, Result};

/// Default vector length, matching common sentence-embedding models.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Weight of a bigram feature relative to a unigram.
const BIGRAM_WEIGHT: f32 = 0.5;

/// Hashing stub embedder.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    /// Create an embedder producing vectors of `dimension` components.
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::Embedding("dimension must be greater than zero".into()));
        }
        warn_stub();
        Ok(Self { dimension })
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();

        for token in &tokens {
            self.add_feature(&mut vector, token, 1.0);
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            self.add_feature(&mut vector, &bigram, BIGRAM_WEIGHT);
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let mut hasher = DefaultHasher::new();
        feature.hash(&mut hasher);
        let hash = hasher.finish();

        let bucket = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

fn warn_stub() {
    log::warn!("using the hashing embedder stub; rankings reflect word overlap only");
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        warn_stub();
        Self {
            dimension: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        log::debug!("hashing {} texts into {} dimensions", texts.len(), self.dimension);
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}
