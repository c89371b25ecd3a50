//! Output record written at the end of a run.

use serde::{Deserialize, Serialize};

use super::RankedSection;

/// Maximum characters of section text carried into `refined_text`.
pub const REFINED_TEXT_MAX_CHARS: usize = 500;

/// Run metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Documents that were found on disk, in input order
    pub input_documents: Vec<String>,

    /// Persona role (or the persona as JSON when it has no role)
    pub persona: String,

    /// Job task (or the job as JSON when it has no task)
    pub job_to_be_done: String,

    /// ISO-8601 local time at which the run started
    pub processing_timestamp: String,
}

/// One entry of `extracted_sections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: u32,
    pub page_number: u32,
}

/// One entry of `subsection_analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// The complete result of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Run metadata
    pub metadata: RunMetadata,

    /// Ranked sections, best first
    pub extracted_sections: Vec<ExtractedSection>,

    /// Refined text of the ranked sections, parallel to `extracted_sections`
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl OutputRecord {
    /// Project ranked sections into the output layout.
    pub fn from_ranked(metadata: RunMetadata, ranked: &[RankedSection]) -> Self {
        let extracted_sections = ranked
            .iter()
            .map(|r| ExtractedSection {
                document: r.section.document.clone(),
                section_title: r.section.title.clone(),
                importance_rank: r.importance_rank,
                page_number: r.section.page,
            })
            .collect();

        let subsection_analysis = ranked
            .iter()
            .map(|r| SubsectionAnalysis {
                document: r.section.document.clone(),
                refined_text: r.refined_text(REFINED_TEXT_MAX_CHARS),
                page_number: r.section.page,
            })
            .collect();

        Self {
            metadata,
            extracted_sections,
            subsection_analysis,
        }
    }

    /// Check if no section was ranked.
    pub fn is_empty(&self) -> bool {
        self.extracted_sections.is_empty()
    }
}
