//! # pdfrank
//!
//! Persona-driven section ranking for PDF collections.
//!
//! Given a set of PDF documents, a persona and a job to be done, this
//! library splits every page into titled sections, drops noise, tags each
//! section with a coarse content type, and ranks the sections by their
//! embedding similarity to a query built from the persona and the job.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfrank::{run, PipelineOptions, render};
//!
//! fn main() -> pdfrank::Result<()> {
//!     let options = PipelineOptions::new().with_pdf_dir("pdfs");
//!     let result = run("challenge1b_input.json", options)?;
//!
//!     render::write_json(&result.output, "challenge1b_output.json", render::JsonFormat::Pretty)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Extraction**: per-page plain text via [`TextExtractor`] (lopdf by default)
//! - **Segmentation**: header-shape heuristics split pages into sections
//! - **Filtering**: short, line-break-heavy and digit-heavy sections are dropped
//! - **Classification**: keyword cues assign a [`ContentType`]
//! - **Ranking**: sentence-embedding cosine similarity ([`SentenceEmbedder`],
//!   all-MiniLM-L6-v2 by default), weighted by content type, stable top-K

pub mod analysis;
pub mod detect;
pub mod embed;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod query;
pub mod rank;
pub mod render;

// Re-export commonly used types
pub use analysis::{classify, SectionAnalyzer, SectionFilter, SectionSegmenter};
pub use embed::{cosine_similarity, EmbeddingBackend, EmbeddingProvider, HashingEmbedder};
#[cfg(feature = "fastembed")]
pub use embed::SentenceEmbedder;
pub use error::{Error, Result};
pub use extract::{ErrorMode, ExtractOptions, PdfTextExtractor, TextExtractor};
pub use model::{
    ContentType, DocumentRef, InputRecord, JobToBeDone, OutputRecord, PageText, Persona,
    RankedSection, RunMetadata, Section,
};
pub use pipeline::{DocumentOutcome, DocumentReport, Pipeline, PipelineOptions, RunResult, RunStats};
pub use query::build_query;
pub use rank::{content_weight, RelevanceRanker};
pub use render::JsonFormat;

use std::path::Path;

/// Read an input record and run the default pipeline over it.
///
/// Fails if the input record cannot be read or decoded, or if the embedding
/// model cannot be loaded; problems with individual documents are reported
/// in [`RunResult::documents`].
///
/// # Example
///
/// ```no_run
/// use pdfrank::{run, PipelineOptions};
///
/// let result = run("input.json", PipelineOptions::default()).unwrap();
/// for section in &result.output.extracted_sections {
///     println!("{}. {} (p.{})", section.importance_rank, section.section_title, section.page_number);
/// }
/// ```
pub fn run<P: AsRef<Path>>(input: P, options: PipelineOptions) -> Result<RunResult> {
    let record = InputRecord::from_path(input)?;
    Ok(Pipeline::with_defaults(options)?.process(&record))
}

/// Extract, segment, filter and classify the sections of one PDF file.
///
/// # Example
///
/// ```no_run
/// let sections = pdfrank::analyze_pdf("report.pdf").unwrap();
/// for s in sections {
///     println!("[{}] p.{} {}", s.content_type, s.page, s.title);
/// }
/// ```
pub fn analyze_pdf<P: AsRef<Path>>(path: P) -> Result<Vec<Section>> {
    let pages = PdfTextExtractor::new().extract(path.as_ref())?;
    Ok(SectionAnalyzer::new().analyze_pages(&pages).sections)
}
