//! Page-level types.

use serde::{Deserialize, Serialize};

/// Plain text of a single page, as produced by a text extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Name of the owning document (file name, not full path)
    pub document: String,

    /// Page number (1-indexed)
    pub number: u32,

    /// Extracted plain text; may be empty
    pub text: String,
}

impl PageText {
    /// Create a new page.
    pub fn new(document: impl Into<String>, number: u32, text: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            number,
            text: text.into(),
        }
    }

    /// Check if the page carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
