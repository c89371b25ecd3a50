//! Page analysis: segmentation, noise filtering and classification.
//!
//! [`SectionAnalyzer`] runs the three stages over one page and returns the
//! sections worth ranking. Every stage is a total function over arbitrary
//! text; nothing here fails.

mod classify;
mod filter;
mod segment;

pub use classify::classify;
pub use filter::{NoiseReason, SectionFilter, MAX_DIGIT_RATIO, MAX_NEWLINE_RATIO, MIN_WORDS};
pub use segment::{
    CandidateSection, SectionSegmenter, DEFAULT_TITLE, FALLBACK_TITLE_MAX_CHARS, HEADER_MAX_CHARS,
    HEADER_MAX_PERIODS, HEADER_MIN_CHARS, UPPERCASE_HEADER_MAX_CHARS,
};

use crate::model::{PageText, Section};

/// Sections kept from one page.
#[derive(Debug, Clone, Default)]
pub struct PageSections {
    /// Number of candidates the segmenter produced
    pub candidates: usize,
    /// Candidates that passed the filter, classified, in reading order
    pub sections: Vec<Section>,
}

/// Turns page text into classified sections.
#[derive(Debug, Clone, Default)]
pub struct SectionAnalyzer {
    segmenter: SectionSegmenter,
    filter: SectionFilter,
}

impl SectionAnalyzer {
    /// Create an analyzer with the standard heuristics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment, filter and classify a single page.
    pub fn analyze_page(&self, page: &PageText) -> PageSections {
        if page.is_blank() {
            return PageSections::default();
        }

        let candidates = self.segmenter.segment(&page.text);
        let count = candidates.len();

        let sections = candidates
            .into_iter()
            .filter(|candidate| match self.filter.noise_reason(&candidate.text) {
                Some(reason) => {
                    log::debug!(
                        "{} p.{}: dropped '{}' ({})",
                        page.document,
                        page.number,
                        candidate.title,
                        reason
                    );
                    false
                }
                None => true,
            })
            .map(|candidate| {
                let content_type = classify(&candidate.text);
                Section::new(
                    page.document.clone(),
                    page.number,
                    candidate.title,
                    candidate.text,
                    content_type,
                )
            })
            .collect();

        PageSections {
            candidates: count,
            sections,
        }
    }

    /// Analyze every page of a document, pooling sections in page order.
    pub fn analyze_pages<'a, I>(&self, pages: I) -> PageSections
    where
        I: IntoIterator<Item = &'a PageText>,
    {
        pages
            .into_iter()
            .fold(PageSections::default(), |mut acc, page| {
                let mut page_sections = self.analyze_page(page);
                acc.candidates += page_sections.candidates;
                acc.sections.append(&mut page_sections.sections);
                acc
            })
    }
}
