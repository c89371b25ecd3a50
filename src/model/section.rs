//! Section types: the unit of ranking.

use serde::{Deserialize, Serialize};

/// Coarse content type of a section, derived from keyword cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Abstracts and summaries
    Abstract,
    /// Introductions and background material
    Introduction,
    /// Methods and approaches
    Methodology,
    /// Results and findings
    Results,
    /// Conclusions and discussion
    Conclusion,
    /// Reference lists and bibliographies
    References,
    /// Anything else
    #[default]
    Content,
}

impl ContentType {
    /// Every content type, in classification priority order.
    pub const ALL: [ContentType; 7] = [
        ContentType::Abstract,
        ContentType::Introduction,
        ContentType::Methodology,
        ContentType::Results,
        ContentType::Conclusion,
        ContentType::References,
        ContentType::Content,
    ];

    /// The lowercase label used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Abstract => "abstract",
            ContentType::Introduction => "introduction",
            ContentType::Methodology => "methodology",
            ContentType::Results => "results",
            ContentType::Conclusion => "conclusion",
            ContentType::References => "references",
            ContentType::Content => "content",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A titled span of one page's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Owning document name
    pub document: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Section title; never empty
    pub title: String,

    /// Section body, trimmed; never empty
    pub text: String,

    /// Classified content type
    pub content_type: ContentType,
}

impl Section {
    /// Create a new section.
    pub fn new(
        document: impl Into<String>,
        page: u32,
        title: impl Into<String>,
        text: impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            document: document.into(),
            page,
            title: title.into(),
            text: text.into(),
            content_type,
        }
    }
}

/// A section selected by the ranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// The ranked section
    #[serde(flatten)]
    pub section: Section,

    /// 1-based position among the selected sections
    pub importance_rank: u32,

    /// Raw cosine similarity to the query, before content-type weighting
    pub relevance_score: f32,
}

impl RankedSection {
    /// Section text cut to `max_chars` characters, with `"..."` appended
    /// when anything was cut.
    pub fn refined_text(&self, max_chars: usize) -> String {
        truncate_with_ellipsis(&self.section.text, max_chars)
    }
}

/// Cut `text` to at most `max_chars` characters, appending `"..."` if cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// The first `max_chars` characters of `text`.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
