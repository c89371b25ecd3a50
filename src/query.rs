//! Query construction from a persona and a job description.

use crate::model::{JobToBeDone, Persona};

/// Separator between query parts.
pub const QUERY_DELIMITER: &str = " | ";

/// Compose the single query string that is embedded for ranking.
///
/// Parts, in order: the task; `Expertise in: ...`, `Focus on: ...` and
/// `Requirements: ...` when the corresponding lists are non-empty; and
/// always `Role: <role>`, even for an empty role.
///
/// ```
/// use pdfrank::{build_query, JobToBeDone, Persona};
///
/// let mut persona = Persona::with_role("Analyst");
/// persona.expertise_areas = vec!["finance".into()];
/// let job = JobToBeDone::with_task("Summarize risk");
///
/// assert_eq!(
///     build_query(&persona, &job),
///     "Summarize risk | Expertise in: finance | Role: Analyst"
/// );
/// ```
pub fn build_query(persona: &Persona, job: &JobToBeDone) -> String {
    let mut parts = vec![job.task.clone().unwrap_or_default()];

    if !persona.expertise_areas.is_empty() {
        parts.push(format!("Expertise in: {}", persona.expertise_areas.join(", ")));
    }
    if !persona.focus_areas.is_empty() {
        parts.push(format!("Focus on: {}", persona.focus_areas.join(", ")));
    }
    if !job.requirements.is_empty() {
        parts.push(format!("Requirements: {}", job.requirements.join(", ")));
    }
    parts.push(format!("Role: {}", persona.role.as_deref().unwrap_or_default()));

    parts.join(QUERY_DELIMITER)
}
