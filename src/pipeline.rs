//! End-to-end orchestration: documents in, ranked sections out.
//!
//! # Example
//!
//! ```no_run
//! use pdfrank::{InputRecord, Pipeline, PipelineOptions};
//!
//! fn main() -> pdfrank::Result<()> {
//!     let input = InputRecord::from_path("challenge1b_input.json")?;
//!     let pipeline = Pipeline::with_defaults(PipelineOptions::new().with_pdf_dir("pdfs"))?;
//!     let result = pipeline.process(&input);
//!     println!("{} sections ranked", result.ranked.len());
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{PageSections, SectionAnalyzer};
use crate::embed::{similarities, EmbeddingBackend, EmbeddingProvider};
use crate::error::Result;
use crate::extract::{ExtractOptions, PdfTextExtractor, TextExtractor};
use crate::model::{DocumentRef, InputRecord, OutputRecord, RankedSection, RunMetadata, Section};
use crate::query::build_query;
use crate::rank::{RelevanceRanker, DEFAULT_TOP_K};

/// Directory searched for PDFs when neither the options nor the input
/// record name one.
pub const DEFAULT_PDF_DIR: &str = "pdfs";

/// Timestamp layout of `processing_timestamp`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Maximum number of ranked sections
    pub top_k: usize,

    /// Directory holding the PDFs; overrides the input record's directory
    pub pdf_dir: Option<PathBuf>,

    /// Extract documents on the rayon pool
    pub parallel: bool,

    /// Options passed to the default PDF extractor
    pub extract: ExtractOptions,

    /// Embedding provider built by [`Pipeline::with_defaults`]
    pub embedding: EmbeddingBackend,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sections returned.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the PDF directory.
    pub fn with_pdf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pdf_dir = Some(dir.into());
        self
    }

    /// Enable or disable parallel document extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Set the embedding backend.
    pub fn with_embedding(mut self, embedding: EmbeddingBackend) -> Self {
        self.embedding = embedding;
        self
    }

    /// Use the named sentence-embedding model.
    pub fn with_model(mut self, name: impl Into<String>) -> Self {
        self.embedding = EmbeddingBackend::model(name);
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            pdf_dir: None,
            parallel: false,
            extract: ExtractOptions::default(),
            embedding: EmbeddingBackend::default(),
        }
    }
}

/// What happened to one input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// Extracted and analyzed
    Processed {
        /// Pages with extractable text
        pages: usize,
        /// Sections kept after filtering
        sections: usize,
    },
    /// No file at the resolved path
    Missing,
    /// The file exists but could not be read
    Failed {
        /// Extractor error message
        reason: String,
    },
}

/// Per-document entry of the run report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    /// File name as given in the input record
    pub filename: String,
    /// Resolved path
    pub path: PathBuf,
    /// Outcome
    #[serde(flatten)]
    pub outcome: DocumentOutcome,
}

impl DocumentReport {
    /// Whether the file was found on disk (processed or failed).
    pub fn is_resolved(&self) -> bool {
        !matches!(self.outcome, DocumentOutcome::Missing)
    }
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Documents extracted successfully
    pub documents_processed: u32,
    /// Documents not found on disk
    pub documents_missing: u32,
    /// Documents that could not be read
    pub documents_failed: u32,
    /// Pages read across all processed documents
    pub pages_read: u32,
    /// Candidate sections produced by segmentation
    pub candidate_sections: u32,
    /// Sections that survived filtering
    pub kept_sections: u32,
    /// Sections in the ranked output
    pub ranked_sections: u32,
}

impl RunStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, report: &DocumentReport, analysis: &PageSections) {
        match report.outcome {
            DocumentOutcome::Processed { pages, .. } => {
                self.documents_processed += 1;
                self.pages_read += pages as u32;
                self.candidate_sections += analysis.candidates as u32;
                self.kept_sections += analysis.sections.len() as u32;
            }
            DocumentOutcome::Missing => self.documents_missing += 1,
            DocumentOutcome::Failed { .. } => self.documents_failed += 1,
        }
    }
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The output record
    pub output: OutputRecord,
    /// Ranked sections with full text and raw scores
    pub ranked: Vec<RankedSection>,
    /// Per-document outcomes, in input order
    pub documents: Vec<DocumentReport>,
    /// Run counters
    pub stats: RunStats,
    /// The query the sections were ranked against
    pub query: String,
}

/// Drives extraction, analysis and ranking over a set of documents.
pub struct Pipeline {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    analyzer: SectionAnalyzer,
    ranker: RelevanceRanker,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline from explicit collaborators.
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            extractor,
            embedder,
            analyzer: SectionAnalyzer::new(),
            ranker: RelevanceRanker::new(options.top_k),
            options,
        }
    }

    /// Create a pipeline with the lopdf extractor and the embedder named by
    /// `options.embedding`. Fails if the embedding model cannot be loaded.
    pub fn with_defaults(options: PipelineOptions) -> Result<Self> {
        let extractor = Arc::new(PdfTextExtractor::with_options(options.extract.clone()));
        let embedder = options.embedding.build()?;
        Ok(Self::new(extractor, embedder, options))
    }

    /// The options in effect.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Directory the documents of `input` are resolved against.
    pub fn pdf_dir_for(&self, input: &InputRecord) -> PathBuf {
        self.options
            .pdf_dir
            .clone()
            .or_else(|| input.pdf_directory.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PDF_DIR))
    }

    /// Run the whole pipeline over an input record.
    ///
    /// Missing and unreadable documents are skipped and reported; an empty
    /// pool of sections produces a valid, empty output record.
    pub fn process(&self, input: &InputRecord) -> RunResult {
        let started = chrono::Local::now();
        let pdf_dir = self.pdf_dir_for(input);
        let query = build_query(&input.persona, &input.job_to_be_done);
        log::debug!("query: {}", query);

        let per_document: Vec<(DocumentReport, PageSections)> = if self.options.parallel {
            input
                .documents
                .par_iter()
                .map(|doc| self.process_document(&pdf_dir, doc))
                .collect()
        } else {
            input
                .documents
                .iter()
                .map(|doc| self.process_document(&pdf_dir, doc))
                .collect()
        };

        // Sequential merge in input order keeps the ranking tie-break stable.
        let mut stats = RunStats::new();
        let mut documents = Vec::with_capacity(per_document.len());
        let mut pool: Vec<Section> = Vec::new();
        for (report, mut analysis) in per_document {
            stats.record(&report, &analysis);
            pool.append(&mut analysis.sections);
            documents.push(report);
        }

        let ranked = self.rank(&pool, &query);
        stats.ranked_sections = ranked.len() as u32;

        let metadata = RunMetadata {
            input_documents: documents
                .iter()
                .filter(|d| d.is_resolved())
                .map(|d| d.filename.clone())
                .collect(),
            persona: input.persona.label(),
            job_to_be_done: input.job_to_be_done.label(),
            processing_timestamp: started.format(TIMESTAMP_FORMAT).to_string(),
        };

        log::info!(
            "processed {} documents ({} missing, {} failed), kept {} of {} sections, ranked {}",
            stats.documents_processed,
            stats.documents_missing,
            stats.documents_failed,
            stats.kept_sections,
            stats.candidate_sections,
            stats.ranked_sections
        );

        RunResult {
            output: OutputRecord::from_ranked(metadata, &ranked),
            ranked,
            documents,
            stats,
            query,
        }
    }

    fn process_document(&self, pdf_dir: &Path, doc: &DocumentRef) -> (DocumentReport, PageSections) {
        let filename = doc.filename().to_string();
        let path = pdf_dir.join(&filename);

        if !path.exists() {
            log::warn!("File not found and skipped: {}", path.display());
            let report = DocumentReport {
                filename,
                path,
                outcome: DocumentOutcome::Missing,
            };
            return (report, PageSections::default());
        }

        match self.extractor.extract(&path) {
            Ok(pages) => {
                let analysis = self.analyzer.analyze_pages(&pages);
                let readable = pages.iter().filter(|p| !p.is_blank()).count();
                log::debug!(
                    "{}: {} pages, {} candidate sections, {} kept",
                    filename,
                    readable,
                    analysis.candidates,
                    analysis.sections.len()
                );
                let report = DocumentReport {
                    filename,
                    path,
                    outcome: DocumentOutcome::Processed {
                        pages: readable,
                        sections: analysis.sections.len(),
                    },
                };
                (report, analysis)
            }
            Err(e) => {
                log::warn!("Failed to process PDF '{}': {}", path.display(), e);
                let report = DocumentReport {
                    filename,
                    path,
                    outcome: DocumentOutcome::Failed {
                        reason: e.to_string(),
                    },
                };
                (report, PageSections::default())
            }
        }
    }

    fn rank(&self, pool: &[Section], query: &str) -> Vec<RankedSection> {
        if pool.is_empty() {
            return Vec::new();
        }

        let texts: Vec<&str> = pool.iter().map(|s| s.text.as_str()).collect();
        match similarities(self.embedder.as_ref(), query, &texts) {
            Ok(scores) => self.ranker.rank(pool, &scores),
            Err(e) => {
                log::error!("Embedding failed, no sections ranked: {}", e);
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("embedding_dim", &self.embedder.dimension())
            .field("ranker", &self.ranker)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::HashingEmbedder;
    use crate::error::Error;
    use crate::model::{JobToBeDone, PageText, Persona};
    use std::collections::HashMap;

    /// Serves canned pages keyed by file name.
    struct CannedExtractor(HashMap<String, Vec<String>>);

    impl TextExtractor for CannedExtractor {
        fn extract(&self, path: &Path) -> Result<Vec<PageText>> {
            let name = crate::extract::document_name(path);
            let pages = self
                .0
                .get(&name)
                .ok_or_else(|| Error::PdfParse(format!("cannot read {}", name)))?;
            Ok(pages
                .iter()
                .enumerate()
                .map(|(i, text)| PageText::new(name.clone(), i as u32 + 1, text.clone()))
                .collect())
        }
    }

    struct FailingEmbedder;

    impl EmbeddingProvider for FailingEmbedder {
        fn dimension(&self) -> usize {
            4
        }

        fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Err(Error::Embedding("model not loaded".into()))
        }
    }

    const BODY: &str = "credit risk exposure increased across the lending portfolio this quarter";

    fn input(docs: &[&str]) -> InputRecord {
        let mut persona = Persona::with_role("Analyst");
        persona.expertise_areas = vec!["finance".into()];
        InputRecord {
            documents: docs.iter().map(|d| DocumentRef::from(*d)).collect(),
            persona,
            job_to_be_done: JobToBeDone::with_task("Summarize risk"),
            pdf_directory: None,
        }
    }

    fn setup(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            std::fs::write(dir.path().join(file), b"%PDF-1.4\n").unwrap();
        }
        dir
    }

    fn canned(entries: Vec<(&str, Vec<String>)>) -> Arc<CannedExtractor> {
        Arc::new(CannedExtractor(
            entries
                .into_iter()
                .map(|(name, pages)| (name.to_string(), pages))
                .collect(),
        ))
    }

    fn offline(options: PipelineOptions) -> Pipeline {
        Pipeline::with_defaults(options.with_embedding(EmbeddingBackend::Hashing)).unwrap()
    }

    fn risk_page() -> String {
        format!("Risk Overview\n{}", BODY)
    }

    #[test]
    fn test_options_builder() {
        let options = PipelineOptions::new()
            .with_top_k(5)
            .with_pdf_dir("docs")
            .with_parallel(true);
        assert_eq!(options.top_k, 5);
        assert_eq!(options.pdf_dir, Some(PathBuf::from("docs")));
        assert!(options.parallel);
    }

    #[test]
    fn test_default_embedding_is_sentence_model() {
        let options = PipelineOptions::new();
        assert_eq!(options.embedding, EmbeddingBackend::model(crate::embed::DEFAULT_MODEL));

        let options = options.with_model("bge-small-en-v1.5");
        assert_eq!(options.embedding, EmbeddingBackend::model("bge-small-en-v1.5"));
    }

    #[test]
    fn test_unknown_model_fails_construction() {
        let result = Pipeline::with_defaults(PipelineOptions::new().with_model("no-such-model"));
        assert!(matches!(result, Err(Error::Embedding(_))));
    }

    #[test]
    fn test_pdf_dir_precedence() {
        let pipeline = offline(PipelineOptions::new());
        let mut record = input(&[]);
        assert_eq!(pipeline.pdf_dir_for(&record), PathBuf::from(DEFAULT_PDF_DIR));

        record.pdf_directory = Some(PathBuf::from("from-record"));
        assert_eq!(pipeline.pdf_dir_for(&record), PathBuf::from("from-record"));

        let pipeline = offline(PipelineOptions::new().with_pdf_dir("from-options"));
        assert_eq!(pipeline.pdf_dir_for(&record), PathBuf::from("from-options"));
    }

    #[test]
    fn test_missing_and_failed_documents() {
        let dir = setup(&["good.pdf", "bad.pdf"]);
        let extractor = canned(vec![("good.pdf", vec![risk_page()])]);
        let pipeline = Pipeline::new(
            extractor,
            Arc::new(HashingEmbedder::default()),
            PipelineOptions::new().with_pdf_dir(dir.path()),
        );

        let result = pipeline.process(&input(&["good.pdf", "gone.pdf", "bad.pdf"]));

        assert_eq!(result.stats.documents_processed, 1);
        assert_eq!(result.stats.documents_missing, 1);
        assert_eq!(result.stats.documents_failed, 1);
        assert_eq!(
            result.output.metadata.input_documents,
            vec!["good.pdf".to_string(), "bad.pdf".to_string()]
        );
        assert!(matches!(result.documents[1].outcome, DocumentOutcome::Missing));
        assert!(matches!(
            result.documents[2].outcome,
            DocumentOutcome::Failed { .. }
        ));
        assert_eq!(result.ranked.len(), 1);
        assert_eq!(result.output.extracted_sections[0].section_title, "Risk Overview");
    }

    #[test]
    fn test_embedding_failure_yields_empty_ranking() {
        let dir = setup(&["good.pdf"]);
        let pipeline = Pipeline::new(
            canned(vec![("good.pdf", vec![risk_page()])]),
            Arc::new(FailingEmbedder),
            PipelineOptions::new().with_pdf_dir(dir.path()),
        );

        let result = pipeline.process(&input(&["good.pdf"]));
        assert_eq!(result.stats.kept_sections, 1);
        assert!(result.ranked.is_empty());
        assert!(result.output.is_empty());
        assert_eq!(result.output.metadata.input_documents, vec!["good.pdf".to_string()]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = setup(&["a.pdf", "b.pdf", "c.pdf"]);
        let extractor = canned(vec![
            ("a.pdf", vec![risk_page()]),
            ("b.pdf", vec![risk_page()]),
            ("c.pdf", vec![risk_page()]),
        ]);
        let docs = ["a.pdf", "b.pdf", "c.pdf"];

        let sequential = Pipeline::new(
            extractor.clone(),
            Arc::new(HashingEmbedder::default()),
            PipelineOptions::new().with_pdf_dir(dir.path()),
        )
        .process(&input(&docs));
        let parallel = Pipeline::new(
            extractor,
            Arc::new(HashingEmbedder::default()),
            PipelineOptions::new()
                .with_pdf_dir(dir.path())
                .with_parallel(true),
        )
        .process(&input(&docs));

        assert_eq!(
            sequential.output.extracted_sections,
            parallel.output.extracted_sections
        );
        // Identical text scores identically; pooled order decides.
        let order: Vec<&str> = parallel
            .output
            .extracted_sections
            .iter()
            .map(|s| s.document.as_str())
            .collect();
        assert_eq!(order, vec!["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_metadata_labels_and_timestamp() {
        let pipeline = offline(PipelineOptions::new());
        let result = pipeline.process(&input(&[]));

        assert_eq!(result.output.metadata.persona, "Analyst");
        assert_eq!(result.output.metadata.job_to_be_done, "Summarize risk");
        assert_eq!(
            result.query,
            "Summarize risk | Expertise in: finance | Role: Analyst"
        );
        let ts = &result.output.metadata.processing_timestamp;
        assert!(chrono::NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).is_ok());
    }
}
