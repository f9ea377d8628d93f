//! Cross-check between a validator's expectations and a template's promises.
//!
//! Both inputs are read as opaque text. The validator source is scanned for
//! its required-section lists and task pattern; the template is scanned for
//! the headings and example task lines of its three artifact blocks.

use crate::config::AlignmentConfig;
use crate::error::Result;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Requirements,
    Plan,
    Tasks,
    General,
}

impl Component {
    pub fn as_str(self) -> &'static str {
        match self {
            Component::Requirements => "requirements",
            Component::Plan => "plan",
            Component::Tasks => "tasks",
            Component::General => "general",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignmentIssue {
    pub severity: Severity,
    pub component: Component,
    pub message: String,
}

impl AlignmentIssue {
    fn error(component: Component, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            component,
            message: message.into(),
        }
    }

    fn warning(component: Component, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            component,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for AlignmentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.severity {
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
        };
        write!(f, "{icon} [{}] {}", self.component, self.message)
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// What the validator checks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Expectations {
    pub requirements_sections: Vec<String>,
    pub plan_sections: Vec<String>,
    pub tasks_sections: Vec<String>,
    pub task_pattern: Option<String>,
}

/// What the template says it generates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Promises {
    pub requirements_sections: Vec<String>,
    pub plan_sections: Vec<String>,
    pub tasks_sections: Vec<String>,
    pub task_format_examples: Vec<String>,
}

/// Marker standing in for every phase heading of the tasks template.
pub const PHASE_MARKER: &str = "## Phase";

static QUOTED_RE: OnceLock<Regex> = OnceLock::new();
static TASK_PATTERN_RE: OnceLock<Regex> = OnceLock::new();
static SECTION_HEADING_RE: OnceLock<Regex> = OnceLock::new();
static PHASE_HEADING_RE: OnceLock<Regex> = OnceLock::new();
static TASK_EXAMPLE_RE: OnceLock<Regex> = OnceLock::new();

fn quoted_re() -> &'static Regex {
    QUOTED_RE.get_or_init(|| Regex::new(r#""([^"]+)""#).unwrap())
}

fn task_pattern_re() -> &'static Regex {
    // `task_pattern = r"..."` and `const TASK_PATTERN: &str = r"...";`
    TASK_PATTERN_RE
        .get_or_init(|| Regex::new(r##"(?i:task_pattern)\b[^=\n]*=\s*r#*"([^"]+)""##).unwrap())
}

fn section_heading_re() -> &'static Regex {
    SECTION_HEADING_RE.get_or_init(|| Regex::new(r"(?m)^(##[ \t]+[A-Za-z \t]+)").unwrap())
}

fn phase_heading_re() -> &'static Regex {
    PHASE_HEADING_RE.get_or_init(|| Regex::new(r"(?m)^##[ \t]+Phase[^:\n]*").unwrap())
}

fn task_example_re() -> &'static Regex {
    TASK_EXAMPLE_RE.get_or_init(|| Regex::new(r"(?m)^- \[ \] (T\d+:[^\r\n]*)").unwrap())
}

/// Quoted strings of the list assigned to `name`, in source order.
fn section_list(source: &str, name: &str) -> Vec<String> {
    let pattern = format!(r"{}\b[^=\n]*=\s*&?\[(?s:(.*?))\]", regex::escape(name));
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    re.captures(source)
        .and_then(|caps| caps.get(1))
        .map(|list| {
            quoted_re()
                .captures_iter(list.as_str())
                .map(|c| c[1].to_string())
                .collect()
        })
        .unwrap_or_default()
}

pub fn extract_expectations(validator_source: &str) -> Expectations {
    Expectations {
        requirements_sections: section_list(validator_source, "REQUIREMENTS_SECTIONS"),
        plan_sections: section_list(validator_source, "PLAN_SECTIONS"),
        tasks_sections: section_list(validator_source, "TASKS_SECTIONS"),
        task_pattern: task_pattern_re()
            .captures(validator_source)
            .map(|c| c[1].to_string()),
    }
}

/// Fenced markdown body following the `## <file> Template` heading.
fn template_block<'a>(template: &'a str, file: &str) -> Option<&'a str> {
    let pattern = format!(
        r"(?si)## {}\s+Template.*?```markdown(.*?)```",
        regex::escape(file)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(template)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn section_headings(block: &str) -> Vec<String> {
    let mut sections: Vec<String> = Vec::new();
    for caps in section_heading_re().captures_iter(block) {
        let heading = caps[1].trim().to_string();
        if !sections.contains(&heading) {
            sections.push(heading);
        }
    }
    sections
}

pub fn extract_promises(template: &str) -> Promises {
    let mut promises = Promises::default();

    if let Some(block) = template_block(template, "requirements.md") {
        promises.requirements_sections = section_headings(block);
    }
    if let Some(block) = template_block(template, "plan.md") {
        promises.plan_sections = section_headings(block);
    }
    if let Some(block) = template_block(template, "tasks.md") {
        if phase_heading_re().is_match(block) {
            promises.tasks_sections = vec![PHASE_MARKER.to_string()];
        }
        promises.task_format_examples = task_example_re()
            .captures_iter(block)
            .map(|c| c[1].trim_end().to_string())
            .collect();
    }

    promises
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

fn compare_sections(
    component: Component,
    expected: &[String],
    promised: &[String],
    issues: &mut Vec<AlignmentIssue>,
) {
    let mut missing: Vec<&str> = Vec::new();
    for s in expected {
        if !promised.contains(s) && !missing.contains(&s.as_str()) {
            missing.push(s);
        }
    }
    let mut extra: Vec<&str> = Vec::new();
    for s in promised {
        if !expected.contains(s) && !extra.contains(&s.as_str()) {
            extra.push(s);
        }
    }

    if !missing.is_empty() {
        issues.push(AlignmentIssue::error(
            component,
            format!("Template missing required sections: {}", missing.join(", ")),
        ));
    }
    if !extra.is_empty() {
        issues.push(AlignmentIssue::warning(
            component,
            format!(
                "Template has extra sections not validated: {}",
                extra.join(", ")
            ),
        ));
    }
}

/// Matches only at the start of `text`, like an anchored match.
fn matches_at_start(pattern: &Regex, text: &str) -> bool {
    pattern.find(text).is_some_and(|m| m.start() == 0)
}

fn compare_task_format(
    task_pattern: &str,
    examples: &[String],
    issues: &mut Vec<AlignmentIssue>,
) {
    let Some(example) = examples.first() else {
        issues.push(AlignmentIssue::warning(
            Component::Tasks,
            "No task format examples found in template",
        ));
        return;
    };
    let full_example = format!("- [ ] {example}");
    match Regex::new(task_pattern) {
        Ok(re) if matches_at_start(&re, &full_example) => {}
        Ok(_) => issues.push(AlignmentIssue::error(
            Component::Tasks,
            format!("Task format '{full_example}' doesn't match expected pattern '{task_pattern}'"),
        )),
        Err(e) => issues.push(AlignmentIssue::error(
            Component::Tasks,
            format!("Expected task pattern '{task_pattern}' is not a valid regular expression: {e}"),
        )),
    }
}

/// Every discrepancy between `expected` and `promised`, errors and warnings
/// interleaved in check order.
pub fn compare(expected: &Expectations, promised: &Promises) -> Vec<AlignmentIssue> {
    let mut issues = Vec::new();

    compare_sections(
        Component::Requirements,
        &expected.requirements_sections,
        &promised.requirements_sections,
        &mut issues,
    );
    compare_sections(
        Component::Plan,
        &expected.plan_sections,
        &promised.plan_sections,
        &mut issues,
    );

    if let Some(pattern) = &expected.task_pattern {
        compare_task_format(pattern, &promised.task_format_examples, &mut issues);
    }

    if let Some(expected_marker) = expected.tasks_sections.first() {
        let present = promised
            .tasks_sections
            .iter()
            .any(|marker| marker.contains(expected_marker.as_str()));
        if !present {
            issues.push(AlignmentIssue::error(
                Component::Tasks,
                format!("Template doesn't have expected section pattern: {expected_marker}"),
            ));
        }
    }

    issues
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    pub validator_path: String,
    pub template_path: String,
    pub issues: Vec<AlignmentIssue>,
}

impl AlignmentReport {
    pub fn errors(&self) -> impl Iterator<Item = &AlignmentIssue> {
        self.issues.iter().filter(|i| i.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &AlignmentIssue> {
        self.issues.iter().filter(|i| !i.is_error())
    }

    /// Warnings alone never fail a run.
    pub fn passed(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// Read both documents named by `config` and compare them.
///
/// A missing document is itself reported as a general error.
pub fn check_alignment(config: &AlignmentConfig) -> Result<AlignmentReport> {
    let mut report = AlignmentReport {
        validator_path: config.validator_path.display().to_string(),
        template_path: config.template_path.display().to_string(),
        issues: Vec::new(),
    };

    if !config.validator_path.exists() {
        report.issues.push(AlignmentIssue::error(
            Component::General,
            format!("Validation script not found: {}", report.validator_path),
        ));
        return Ok(report);
    }
    if !config.template_path.exists() {
        report.issues.push(AlignmentIssue::error(
            Component::General,
            format!("Template file not found: {}", report.template_path),
        ));
        return Ok(report);
    }

    let expected = extract_expectations(&std::fs::read_to_string(&config.validator_path)?);
    let promised = extract_promises(&std::fs::read_to_string(&config.template_path)?);
    tracing::debug!(
        expected_requirements = expected.requirements_sections.len(),
        expected_plan = expected.plan_sections.len(),
        promised_requirements = promised.requirements_sections.len(),
        promised_plan = promised.plan_sections.len(),
        examples = promised.task_format_examples.len(),
        "extracted alignment contracts"
    );

    report.issues = compare(&expected, &promised);
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
