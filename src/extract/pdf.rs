//! Page text extraction backed by lopdf.

use std::path::Path;

use lopdf::Document as LopdfDocument;
use unicode_normalization::UnicodeNormalization;

use crate::detect::sniff_pdf_version;
use crate::error::{Error, Result};
use crate::model::PageText;

use super::options::{ErrorMode, ExtractOptions};
use super::TextExtractor;

/// Extracts per-page plain text from PDF files.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor {
    options: ExtractOptions,
}

impl PdfTextExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract pages from an in-memory PDF, attributing them to `document`.
    pub fn extract_bytes(&self, document: &str, data: &[u8]) -> Result<Vec<PageText>> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        self.extract_document(document, &doc)
    }

    fn extract_document(&self, document: &str, doc: &LopdfDocument) -> Result<Vec<PageText>> {
        if doc.is_encrypted() {
            log::warn!("{}: document is encrypted, text may be unreadable", document);
        }

        let pages = doc.get_pages();
        let mut result = Vec::with_capacity(pages.len());

        for page_num in pages.keys().copied() {
            match doc.extract_text(&[page_num]) {
                Ok(text) => {
                    let text = if self.options.normalize_unicode {
                        text.nfc().collect()
                    } else {
                        text
                    };
                    result.push(PageText::new(document, page_num, text));
                }
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(Error::TextExtract(format!("Page {}: {}", page_num, e)));
                    }
                    log::warn!(
                        "{}: failed to extract text from page {}: {}",
                        document,
                        page_num,
                        e
                    );
                }
            }
        }

        log::debug!("{}: extracted {} of {} pages", document, result.len(), pages.len());
        Ok(result)
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<PageText>> {
        sniff_pdf_version(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        let document = super::document_name(path);
        self.extract_document(&document, &doc)
    }
}
