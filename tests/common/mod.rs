//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pdfrank::{EmbeddingBackend, PipelineOptions};

/// Body line long enough to survive the noise filter.
pub const RISK_BODY: &str =
    "credit risk exposure increased across the lending portfolio during the last quarter";

/// Pipeline options reading PDFs from `dir` with the offline embedder.
pub fn offline(dir: &Path) -> PipelineOptions {
    PipelineOptions::new()
        .with_pdf_dir(dir)
        .with_embedding(EmbeddingBackend::Hashing)
}

/// Build a PDF whose pages hold the given lines, one text object per line.
pub fn build_pdf(pages: &[&[&str]]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 11.into()]));
            operations.push(Operation::new(
                "Td",
                vec![72.into(), (760 - 16 * i as i64).into()],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content stream encodes"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a PDF with the given pages to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, pages: &[&[&str]]) -> PathBuf {
    let path = dir.join(name);
    build_pdf(pages).save(&path).expect("fixture PDF is written");
    path
}

/// A two-page report: a risk section on page one, an appendix on page two.
pub fn write_risk_report(dir: &Path, name: &str) -> PathBuf {
    write_pdf(
        dir,
        name,
        &[
            &["Risk Overview", RISK_BODY],
            &[
                "Appendix Notes",
                "additional tables describing regional branch staffing levels are listed here",
            ],
        ],
    )
}

/// Write an input record naming `documents`.
pub fn write_input(dir: &Path, documents: &[&str]) -> PathBuf {
    let record = serde_json::json!({
        "challenge_info": { "challenge_id": "round_1b_test" },
        "documents": documents.iter().map(|d| serde_json::json!({ "filename": d, "title": d })).collect::<Vec<_>>(),
        "persona": { "role": "Analyst", "expertise_areas": ["finance"] },
        "job_to_be_done": { "task": "Summarize risk" },
    });
    let path = dir.join("input.json");
    std::fs::write(&path, serde_json::to_string_pretty(&record).unwrap()).unwrap();
    path
}
