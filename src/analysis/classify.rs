//! Keyword-cue content classification.

use crate::model::ContentType;

/// Ordered rule table: the first entry with a matching cue wins.
const RULES: [(&[&str], ContentType); 6] = [
    (&["abstract", "summary"], ContentType::Abstract),
    (&["introduction", "background"], ContentType::Introduction),
    (&["method", "approach"], ContentType::Methodology),
    (&["result", "finding"], ContentType::Results),
    (&["conclusion", "discussion"], ContentType::Conclusion),
    (&["reference", "bibliography"], ContentType::References),
];

/// Label section text with a content type.
///
/// Cues are matched as case-insensitive substrings, so "methodological"
/// counts as "method" and "summary" anywhere in the body makes an abstract.
pub fn classify(text: &str) -> ContentType {
    let folded = text.to_lowercase();
    RULES
        .iter()
        .find(|(cues, _)| cues.iter().any(|cue| folded.contains(cue)))
        .map(|(_, content_type)| *content_type)
        .unwrap_or(ContentType::Content)
}
