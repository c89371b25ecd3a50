//! Input record: which documents to read and whose information need to serve.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A document entry: either a bare file name or an object with `filename`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentRef {
    /// `"report.pdf"`
    Name(String),
    /// `{"filename": "report.pdf", "title": "..."}`
    Entry {
        /// File name relative to the PDF directory
        filename: String,
        /// Optional human title (informational only)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

impl DocumentRef {
    /// The file name to resolve against the PDF directory.
    pub fn filename(&self) -> &str {
        match self {
            DocumentRef::Name(name) => name,
            DocumentRef::Entry { filename, .. } => filename,
        }
    }
}

impl From<&str> for DocumentRef {
    fn from(name: &str) -> Self {
        DocumentRef::Name(name.to_string())
    }
}

/// The reader whose information need drives ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Role description, e.g. "Investment Analyst"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Areas the persona is expert in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expertise_areas: Vec<String>,

    /// Areas the persona wants to focus on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub focus_areas: Vec<String>,

    /// Any other keys present in the input
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Persona {
    /// Create a persona with just a role.
    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Self::default()
        }
    }

    /// Label used in output metadata: the role, or the whole persona as JSON.
    pub fn label(&self) -> String {
        match &self.role {
            Some(role) => role.clone(),
            None => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

/// The task the persona is trying to accomplish.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task statement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,

    /// Explicit requirements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,

    /// Any other keys present in the input
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl JobToBeDone {
    /// Create a job with just a task.
    pub fn with_task(task: impl Into<String>) -> Self {
        Self {
            task: Some(task.into()),
            ..Self::default()
        }
    }

    /// Label used in output metadata: the task, or the whole job as JSON.
    pub fn label(&self) -> String {
        match &self.task {
            Some(task) => task.clone(),
            None => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

/// A complete run request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Documents to process, in order
    #[serde(default)]
    pub documents: Vec<DocumentRef>,

    /// Persona description
    #[serde(default)]
    pub persona: Persona,

    /// Job description
    #[serde(default)]
    pub job_to_be_done: JobToBeDone,

    /// Directory holding the PDF files, if the record names one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_directory: Option<PathBuf>,
}

impl InputRecord {
    /// Read and decode an input record from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Decode an input record from a JSON string.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}
