use crate::error::Result;
use crate::paths;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

// Read as text by the alignment checker; keep each list on one assignment.
pub const REQUIREMENTS_SECTIONS: &[&str] = &["## Overview", "## Requirements"];
pub const PLAN_SECTIONS: &[&str] = &["## Implementation Phases"];
pub const TASKS_SECTIONS: &[&str] = &["## Tasks"];
pub const TASK_PATTERN: &str = r"^###\s+T\d{3}";

// ---------------------------------------------------------------------------
// ArtifactKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Requirements,
    Plan,
    Tasks,
}

impl ArtifactKind {
    pub fn all() -> &'static [ArtifactKind] {
        &[ArtifactKind::Requirements, ArtifactKind::Plan, ArtifactKind::Tasks]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Requirements => "requirements",
            ArtifactKind::Plan => "plan",
            ArtifactKind::Tasks => "tasks",
        }
    }

    pub fn filename(self) -> &'static str {
        match self {
            ArtifactKind::Requirements => paths::REQUIREMENTS_FILE,
            ArtifactKind::Plan => paths::PLAN_FILE,
            ArtifactKind::Tasks => paths::TASKS_FILE,
        }
    }

    pub fn required_sections(self) -> &'static [&'static str] {
        match self {
            ArtifactKind::Requirements => REQUIREMENTS_SECTIONS,
            ArtifactKind::Plan => PLAN_SECTIONS,
            ArtifactKind::Tasks => TASKS_SECTIONS,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValidationReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundFile {
    pub name: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub spec_dir: String,
    /// One human-readable reason per violated rule, in check order.
    pub failures: Vec<String>,
    /// Required files that exist, with their sizes.
    pub files: Vec<FoundFile>,
}

impl ValidationReport {
    fn new(spec_dir: &Path) -> Self {
        Self {
            spec_dir: spec_dir.display().to_string(),
            failures: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Required sections absent from `content`, by literal substring search.
pub fn missing_sections<'a>(content: &str, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|section| !content.contains(section))
        .collect()
}

static TASK_HEADING_RE: OnceLock<Regex> = OnceLock::new();

fn task_heading_re() -> &'static Regex {
    TASK_HEADING_RE.get_or_init(|| {
        RegexBuilder::new(TASK_PATTERN)
            .multi_line(true)
            .build()
            .unwrap()
    })
}

/// True when some line starts a heading-style task (`### T001`).
pub fn has_task_heading(content: &str) -> bool {
    task_heading_re().is_match(content)
}

/// Check that `spec_dir` holds the three artifacts with their required
/// sections and at least one heading-style task.
///
/// A missing or non-directory path fails immediately. Otherwise every rule
/// is evaluated and each violation adds one failure; section checks are
/// skipped only for files that are absent.
pub fn validate_spec_directory(spec_dir: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(spec_dir);

    if !spec_dir.exists() {
        report
            .failures
            .push(format!("Spec directory does not exist: {}", spec_dir.display()));
        return Ok(report);
    }
    if !spec_dir.is_dir() {
        report
            .failures
            .push(format!("Path is not a directory: {}", spec_dir.display()));
        return Ok(report);
    }

    for kind in ArtifactKind::all() {
        let name = kind.filename();
        let path = spec_dir.join(name);
        if !path.exists() {
            report.failures.push(format!("Missing required file: {name}"));
            continue;
        }
        if !path.is_file() {
            report
                .failures
                .push(format!("{name} exists but is not a file"));
            continue;
        }

        let content = std::fs::read_to_string(&path)?;
        report.files.push(FoundFile {
            name: name.to_string(),
            bytes: std::fs::metadata(&path)?.len(),
        });

        let missing = missing_sections(&content, kind.required_sections());
        if !missing.is_empty() {
            let lines: Vec<String> = missing.iter().map(|s| format!("  - {s}")).collect();
            report.failures.push(format!(
                "{name} is missing required sections:\n{}",
                lines.join("\n")
            ));
        }

        if *kind == ArtifactKind::Tasks && !has_task_heading(&content) {
            report.failures.push(format!(
                "{name} does not contain any tasks in the expected format (### T001: ...)"
            ));
        }
    }

    tracing::debug!(
        spec_dir = %spec_dir.display(),
        failures = report.failures.len(),
        "validated spec artifacts"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
