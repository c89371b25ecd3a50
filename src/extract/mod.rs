//! Page text extraction.
//!
//! The pipeline depends only on [`TextExtractor`]; [`PdfTextExtractor`] is
//! the lopdf-backed implementation used by default.

mod options;
mod pdf;

pub use options::{ErrorMode, ExtractOptions};
pub use pdf::PdfTextExtractor;

use std::path::Path;

use crate::error::Result;
use crate::model::PageText;

/// Yields the plain text of every page of a document.
pub trait TextExtractor: Send + Sync {
    /// Extract the pages of the file at `path`, in page order.
    ///
    /// An `Err` is a per-document failure: the caller skips the document
    /// and carries on with the rest.
    fn extract(&self, path: &Path) -> Result<Vec<PageText>>;
}

/// The name a document is reported under: its file name.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
