//! Data model for the ranking pipeline.
//!
//! Pages come out of an extractor, sections come out of the analysis
//! stage, ranked sections come out of the ranker, and the input and output
//! records are the JSON documents a run reads and writes. All of them are
//! plain value types.

mod input;
mod output;
mod page;
mod section;

pub use input::{DocumentRef, InputRecord, JobToBeDone, Persona};
pub use output::{
    ExtractedSection, OutputRecord, RunMetadata, SubsectionAnalysis, REFINED_TEXT_MAX_CHARS,
};
pub use page::PageText;
pub use section::{truncate_with_ellipsis, ContentType, RankedSection, Section};

pub(crate) use section::truncate_chars;
