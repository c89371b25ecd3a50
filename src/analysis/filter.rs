//! Noise filtering for candidate sections.

use regex::Regex;

/// Sections with fewer words than this are dropped.
pub const MIN_WORDS: usize = 10;
/// Sections whose newline-to-character ratio exceeds this are dropped.
pub const MAX_NEWLINE_RATIO: f64 = 0.1;
/// Sections whose digit-to-character ratio exceeds this are dropped.
pub const MAX_DIGIT_RATIO: f64 = 0.3;

/// Why a section was judged to be noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseReason {
    /// Fewer than [`MIN_WORDS`] words
    TooFewWords,
    /// Mostly line breaks: a list of fragments, a table or a form
    LineBreakHeavy,
    /// Mostly digits: a numeric table, an index or a page of figures
    DigitHeavy,
}

impl std::fmt::Display for NoiseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseReason::TooFewWords => write!(f, "fewer than {} words", MIN_WORDS),
            NoiseReason::LineBreakHeavy => write!(f, "newline ratio above {}", MAX_NEWLINE_RATIO),
            NoiseReason::DigitHeavy => write!(f, "digit ratio above {}", MAX_DIGIT_RATIO),
        }
    }
}

/// Decides whether a candidate section carries enough signal to keep.
///
/// Operates on the text as accumulated by the segmenter; the newline check
/// only bites on whole-page fallback sections, which keep their line breaks.
#[derive(Debug, Clone)]
pub struct SectionFilter {
    digit: Regex,
}

impl SectionFilter {
    /// Create a filter with the standard thresholds.
    pub fn new() -> Self {
        Self {
            digit: Regex::new(r"\d").expect("digit pattern is a valid regex"),
        }
    }

    /// Return the first reason `text` is noise, or `None` if it is kept.
    pub fn noise_reason(&self, text: &str) -> Option<NoiseReason> {
        if text.split_whitespace().count() < MIN_WORDS {
            return Some(NoiseReason::TooFewWords);
        }

        let chars = text.chars().count();
        if chars == 0 {
            return None;
        }
        let chars = chars as f64;

        let newlines = text.matches('\n').count() as f64;
        if newlines / chars > MAX_NEWLINE_RATIO {
            return Some(NoiseReason::LineBreakHeavy);
        }

        let digits = self.digit.find_iter(text).count() as f64;
        if digits / chars > MAX_DIGIT_RATIO {
            return Some(NoiseReason::DigitHeavy);
        }

        None
    }

    /// Check if `text` should be kept.
    pub fn is_meaningful(&self, text: &str) -> bool {
        self.noise_reason(text).is_none()
    }
}

impl Default for SectionFilter {
    fn default() -> Self {
        Self::new()
    }
}
