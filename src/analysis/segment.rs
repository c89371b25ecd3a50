//! Header-driven segmentation of a page into titled sections.
//!
//! Extracted PDF text carries no structure, so headers are recognised by
//! shape alone: short lines that look like title-cased phrases, numbered or
//! roman-numbered headings, or all-caps labels. Everything between two
//! headers becomes the body of the first one.

use regex::Regex;

use crate::model::truncate_chars;

/// Minimum header length in characters.
pub const HEADER_MIN_CHARS: usize = 3;
/// Maximum header length in characters.
pub const HEADER_MAX_CHARS: usize = 150;
/// All-caps lines longer than this are running captions, not headers.
pub const UPPERCASE_HEADER_MAX_CHARS: usize = 50;
/// Lines with more periods than this read as sentences or reference lists.
pub const HEADER_MAX_PERIODS: usize = 3;
/// Fallback titles taken from a triggering line are cut to this length.
pub const FALLBACK_TITLE_MAX_CHARS: usize = 100;
/// Title used when nothing better can be derived.
pub const DEFAULT_TITLE: &str = "Content";

const HEADER_PATTERNS: [&str; 5] = [
    // Title-cased phrase: letters, spaces, '&' and '-' only
    r"^[A-Z][A-Za-z\s&-]+$",
    // "3. Results"
    r"^\d+\.\s*[A-Z]",
    // "IV. Discussion"
    r"^[IVX]+\.\s*[A-Z]",
    // "EXECUTIVE SUMMARY"
    r"^[A-Z\s]+$",
    // "Travel Tips and more..."
    r"^[A-Z][a-z]+\s+[A-Z][a-z]+",
];

/// A section as cut from the page, before filtering and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSection {
    /// Header line, or a derived title
    pub title: String,
    /// Body text, trimmed
    pub text: String,
}

impl CandidateSection {
    fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Splits page text into titled sections.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    header_patterns: Vec<Regex>,
}

impl SectionSegmenter {
    /// Create a segmenter with the built-in header shapes.
    pub fn new() -> Self {
        Self {
            header_patterns: HEADER_PATTERNS
                .iter()
                .map(|p| Regex::new(p).expect("header pattern is a valid regex"))
                .collect(),
        }
    }

    /// Split one page's text into sections, in reading order.
    ///
    /// Never fails: a page with text but no recognisable header comes back
    /// as a single section titled by [`meaningful_title`](Self::meaningful_title).
    pub fn segment(&self, text: &str) -> Vec<CandidateSection> {
        let mut sections = Vec::new();
        let mut title: Option<String> = None;
        let mut body = String::new();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if self.is_section_header(line) {
                let body_trimmed = body.trim();
                if !body_trimmed.is_empty() {
                    let finished = title
                        .take()
                        .unwrap_or_else(|| truncate_chars(line, FALLBACK_TITLE_MAX_CHARS).to_string());
                    sections.push(CandidateSection::new(finished, body_trimmed));
                }
                title = Some(line.to_string());
                body.clear();
            } else {
                body.push_str(line);
                body.push(' ');
            }
        }

        // Text that never saw a header is left to the whole-page fallback.
        let body_trimmed = body.trim();
        if let Some(title) = title {
            if !body_trimmed.is_empty() {
                sections.push(CandidateSection::new(title, body_trimmed));
            }
        }

        let page = text.trim();
        if sections.is_empty() && !page.is_empty() {
            sections.push(CandidateSection::new(self.meaningful_title(text), page));
        }

        sections
    }

    /// Decide whether a trimmed line opens a new section.
    pub fn is_section_header(&self, line: &str) -> bool {
        let len = line.chars().count();
        if !(HEADER_MIN_CHARS..=HEADER_MAX_CHARS).contains(&len) {
            return false;
        }
        if is_uppercase(line) && len > UPPERCASE_HEADER_MAX_CHARS {
            return false;
        }
        if line.matches('.').count() > HEADER_MAX_PERIODS {
            return false;
        }

        self.header_patterns.iter().any(|re| re.is_match(line))
    }

    /// Derive a title for a page on which no header was found.
    ///
    /// Tries, in order: one of the first three sentences of 20 to 100
    /// characters; the first line of 10 to 100 characters; the first ten
    /// words, with `"..."` if the text is longer.
    pub fn meaningful_title(&self, text: &str) -> String {
        let sentence = text
            .split(['.', '!', '?'])
            .take(3)
            .map(str::trim)
            .find(|s| (20..=100).contains(&s.chars().count()));
        if let Some(sentence) = sentence {
            return sentence.to_string();
        }

        let line = text
            .lines()
            .map(str::trim)
            .find(|l| (10..=100).contains(&l.chars().count()));
        if let Some(line) = line {
            return line.to_string();
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return DEFAULT_TITLE.to_string();
        }
        let mut title = words[..words.len().min(10)].join(" ");
        if words.len() > 10 {
            title.push_str("...");
        }
        title
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// True when the line has cased characters and none of them is lowercase.
fn is_uppercase(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg() -> SectionSegmenter {
        SectionSegmenter::new()
    }

    #[test]
    fn test_single_header_with_body() {
        let text = "Executive Summary\nrevenue grew in every region this year\nand margins held steady across segments";
        let sections = seg().segment(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Executive Summary");
        assert_eq!(
            sections[0].text,
            "revenue grew in every region this year and margins held steady across segments"
        );
    }

    #[test]
    fn test_multiple_headers_in_order() {
        let text = "1. Introduction\nthis paper studies things\n2. Methods\nwe measured them carefully";
        let sections = seg().segment(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "1. Introduction");
        assert_eq!(sections[0].text, "this paper studies things");
        assert_eq!(sections[1].title, "2. Methods");
        assert_eq!(sections[1].text, "we measured them carefully");
    }

    #[test]
    fn test_body_before_first_header_takes_header_as_title() {
        let text = "some leading text without a header\nClosing Remarks\nthe end of it all";
        let sections = seg().segment(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Closing Remarks");
        assert_eq!(sections[0].text, "some leading text without a header");
        assert_eq!(sections[1].title, "Closing Remarks");
    }

    #[test]
    fn test_fallback_title_from_header_is_truncated() {
        let header = format!("A{}", "b".repeat(119));
        let text = format!("lowercase body line\n{}\nmore body", header);
        let sections = seg().segment(&text);

        assert_eq!(sections[0].title.chars().count(), 100);
        assert_eq!(sections[1].title, header);
    }

    #[test]
    fn test_consecutive_headers_drop_empty_sections() {
        let text = "Overview\nDetails\nthe only body line";
        let sections = seg().segment(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Details");
    }

    #[test]
    fn test_only_headers_falls_back_to_whole_page() {
        let text = "Overview\nDetails";
        let sections = seg().segment(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, "Overview\nDetails");
        assert_eq!(sections[0].title, "Overview Details");
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        assert!(seg().segment("").is_empty());
        assert!(seg().segment("   \n\n  ").is_empty());
    }

    #[test]
    fn test_no_header_sentence_title() {
        let text = "the quarterly results were strong overall. more text follows here";
        let sections = seg().segment(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "the quarterly results were strong overall");
        assert_eq!(sections[0].text, text);
    }

    #[test]
    fn test_no_header_line_title() {
        // Every sentence is too short or too long; the first line fits.
        let long = "x".repeat(120);
        let text = format!("ok. fine. {}\nshort line here\n", long);
        let title = seg().meaningful_title(&text);
        assert_eq!(title, "short line here");

        let sections = seg().segment(&text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "short line here");
    }

    fn words(n: usize) -> Vec<String> {
        // Ten-character words keep every sentence and line above 100 chars.
        (0..n).map(|i| format!("word{:06}", i)).collect()
    }

    #[test]
    fn test_no_header_word_title_with_ellipsis() {
        let all = words(12);
        let text = all.join(" ");
        let expected = format!("{}...", all[..10].join(" "));

        assert_eq!(seg().meaningful_title(&text), expected);

        let sections = seg().segment(&text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, expected);
    }

    #[test]
    fn test_no_header_word_title_without_ellipsis() {
        let text = words(10).join(" ");
        assert_eq!(seg().meaningful_title(&text), text);

        assert_eq!(seg().meaningful_title("a b c d e"), "a b c d e");
    }

    #[test]
    fn test_title_of_blank_text_is_default() {
        assert_eq!(seg().meaningful_title("  \n "), DEFAULT_TITLE);
    }

    #[test]
    fn test_no_header_page_uses_whole_text() {
        let text = "first line of prose\nsecond line of prose\n";
        let sections = seg().segment(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, "first line of prose\nsecond line of prose");
        assert_eq!(sections[0].title, "first line of prose\nsecond line of prose");
    }

    #[test]
    fn test_header_shapes() {
        let s = seg();
        assert!(s.is_section_header("Introduction"));
        assert!(s.is_section_header("Research & Development"));
        assert!(s.is_section_header("3. Results of the survey"));
        assert!(s.is_section_header("IV. Discussion"));
        assert!(s.is_section_header("APPENDIX A"));
        assert!(s.is_section_header("Travel Tips, part two"));
    }

    #[test]
    fn test_header_rejections() {
        let s = seg();
        assert!(!s.is_section_header("Hi"));
        assert!(!s.is_section_header(&format!("A{}", "a".repeat(150))));
        assert!(!s.is_section_header("this line starts lowercase"));
        assert!(!s.is_section_header("Revenue grew 12% in 2023"));
        assert!(!s.is_section_header(&"UPPERCASE CAPTION ".repeat(3)));
        assert!(!s.is_section_header("1. A. B. C. D"));
    }

    #[test]
    fn test_header_length_bounds_inclusive() {
        let s = seg();
        assert!(s.is_section_header("Abc"));
        assert!(s.is_section_header(&format!("A{}", "b".repeat(149))));
    }

    #[test]
    fn test_uppercase_exclusion_only_over_fifty() {
        let s = seg();
        let fifty = "A".repeat(50);
        assert!(s.is_section_header(&fifty));
        let fifty_one = "A".repeat(51);
        assert!(!s.is_section_header(&fifty_one));
    }

    #[test]
    fn test_is_uppercase() {
        assert!(is_uppercase("ABC 123"));
        assert!(!is_uppercase("ABc"));
        assert!(!is_uppercase("123"));
    }
}
