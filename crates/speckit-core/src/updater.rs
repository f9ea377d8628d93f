use crate::codec;
use crate::config::{ConventionChoice, DuplicatePolicy, UpdateConfig};
use crate::document::Document;
use crate::error::{Result, SpecKitError};
use crate::locator;
use crate::paths;
use crate::types::{Convention, StatusSet, TaskStatus};
use serde::Serialize;
use std::path::Path;

/// What a status update did to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub path: String,
    pub task_id: String,
    pub status: TaskStatus,
    pub convention: Convention,
    /// Textual occurrences of the task that were rewritten.
    pub occurrences: usize,
    /// False when the task already carried `status`.
    pub changed: bool,
}

impl UpdateOutcome {
    pub fn has_duplicates(&self) -> bool {
        self.occurrences > 1
    }

    pub fn duplicate_warning(&self) -> Option<String> {
        self.has_duplicates().then(|| {
            format!(
                "Multiple matches found for {}. Updated {} occurrences.",
                self.task_id, self.occurrences
            )
        })
    }
}

/// Rewrite the status markers of `task_id` in `doc.text`.
///
/// Only marker bytes change; everything else is preserved. With
/// [`DuplicatePolicy::RewriteAll`] every occurrence is rewritten, with
/// [`DuplicatePolicy::Fail`] a duplicated identifier leaves the text untouched.
pub fn set_status(
    doc: &mut Document,
    task_id: &str,
    status: TaskStatus,
    convention: Convention,
    duplicates: DuplicatePolicy,
) -> Result<UpdateOutcome> {
    let found = locator::locate(&doc.text, task_id, convention)?;
    tracing::debug!(task_id, %convention, occurrences = found.len(), "located task");

    if found.is_empty() {
        return Err(SpecKitError::TaskNotFound {
            task_id: task_id.to_string(),
            path: doc.path.display().to_string(),
        });
    }
    if found.len() > 1 {
        if duplicates == DuplicatePolicy::Fail {
            return Err(SpecKitError::DuplicateTask {
                task_id: task_id.to_string(),
                count: found.len(),
            });
        }
        tracing::debug!(task_id, occurrences = found.len(), "rewriting duplicated task id");
    }

    let mut markers: Vec<_> = found.iter().flat_map(|m| m.markers.iter()).collect();
    // Splice back to front so earlier offsets stay valid.
    markers.sort_by(|a, b| b.range.start.cmp(&a.range.start));

    let mut updated = doc.text.clone();
    for marker in markers {
        updated.replace_range(marker.range.clone(), &codec::encode(marker.kind, status));
    }

    let changed = updated != doc.text;
    doc.text = updated;

    Ok(UpdateOutcome {
        path: doc.path.display().to_string(),
        task_id: task_id.to_string(),
        status,
        convention,
        occurrences: found.len(),
        changed,
    })
}

/// Validate inputs, update one task in the file at `path`, and write it back.
///
/// The identifier and status are validated before the file is read; the
/// status is checked again against the detected convention before any write.
pub fn update_task_status(
    path: &Path,
    raw_task_id: &str,
    raw_status: &str,
    config: &UpdateConfig,
) -> Result<UpdateOutcome> {
    let task_id = paths::normalize_task_id(raw_task_id)?;
    let upfront = match config.convention {
        ConventionChoice::Fixed(c) => c.status_set(),
        ConventionChoice::Auto => StatusSet::Extended,
    };
    upfront.parse(raw_status)?;

    let mut doc = Document::load(path)?;
    let convention = locator::resolve_convention(config.convention, &doc.text);
    let status = convention.status_set().parse(raw_status)?;

    let outcome = set_status(&mut doc, &task_id, status, convention, config.duplicates)?;
    if outcome.changed {
        doc.save()?;
    } else {
        tracing::debug!(task_id = %outcome.task_id, "status unchanged, skipping write");
    }
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
