//! Weighted top-K relevance ranking.
//!
//! Raw similarities are scaled by a per-content-type weight for ordering
//! only; the reported score is always the raw similarity. Ordering is a
//! stable sort, so sections with exactly equal weighted scores keep the
//! order in which they were pooled.

use crate::model::{ContentType, RankedSection, Section};

/// Default number of sections returned.
pub const DEFAULT_TOP_K: usize = 10;

/// Ordering weight for each content type.
const WEIGHTS: [(ContentType, f32); 7] = [
    (ContentType::Abstract, 1.2),
    (ContentType::Introduction, 1.1),
    (ContentType::Methodology, 1.3),
    (ContentType::Results, 1.3),
    (ContentType::Conclusion, 1.2),
    (ContentType::References, 0.5),
    (ContentType::Content, 1.0),
];

/// Ordering weight of a content type.
pub fn content_weight(content_type: ContentType) -> f32 {
    WEIGHTS
        .iter()
        .find(|(ty, _)| *ty == content_type)
        .map(|(_, weight)| *weight)
        .unwrap_or(1.0)
}

/// Selects and orders the most relevant sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevanceRanker {
    top_k: usize,
}

impl RelevanceRanker {
    /// Create a ranker returning at most `top_k` sections.
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Maximum number of sections returned.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Rank `sections` by `scores`, the raw similarity of each section to
    /// the query, aligned by index.
    ///
    /// Returns an empty list when there is nothing to rank. If the two
    /// slices differ in length only the aligned prefix is considered.
    pub fn rank(&self, sections: &[Section], scores: &[f32]) -> Vec<RankedSection> {
        if sections.is_empty() || scores.is_empty() {
            return Vec::new();
        }
        if sections.len() != scores.len() {
            log::warn!(
                "{} sections but {} scores; ranking the first {}",
                sections.len(),
                scores.len(),
                sections.len().min(scores.len())
            );
        }

        let mut weighted: Vec<(f32, usize)> = sections
            .iter()
            .zip(scores)
            .enumerate()
            .map(|(idx, (section, score))| {
                (sort_key(score * content_weight(section.content_type)), idx)
            })
            .collect();

        // `sort_by` is stable: equal weighted scores keep pooled order.
        weighted.sort_by(|a, b| b.0.total_cmp(&a.0));

        weighted
            .into_iter()
            .take(self.top_k)
            .enumerate()
            .map(|(pos, (_, idx))| RankedSection {
                section: sections[idx].clone(),
                importance_rank: pos as u32 + 1,
                relevance_score: scores[idx],
            })
            .collect()
    }
}

/// Weighted score as a sort key: NaN sinks below every real score and
/// negative zero folds into zero, so `total_cmp` orders like `>=` does.
fn sort_key(weighted: f32) -> f32 {
    if weighted.is_nan() {
        f32::NEG_INFINITY
    } else if weighted == 0.0 {
        0.0
    } else {
        weighted
    }
}

impl Default for RelevanceRanker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}
