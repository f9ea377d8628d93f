use crate::codec::{self, MarkerKind};
use crate::config::ConventionChoice;
use crate::error::{Result, SpecKitError};
use crate::types::Convention;
use regex::Regex;
use serde::Serialize;
use std::ops::Range;
use std::sync::OnceLock;

/// A status-bearing byte range inside a located task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub range: Range<usize>,
}

/// One textual occurrence of a task under a convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskMatch {
    pub span: Range<usize>,
    pub markers: Vec<Marker>,
}

// ---------------------------------------------------------------------------
// Convention detection
// ---------------------------------------------------------------------------

static HEADING_STATUS_RE: OnceLock<Regex> = OnceLock::new();
static TASK_LINE_RE: OnceLock<Regex> = OnceLock::new();
static CHECKBOX_LINE_RE: OnceLock<Regex> = OnceLock::new();
static HEADING_LINE_RE: OnceLock<Regex> = OnceLock::new();

fn heading_status_re() -> &'static Regex {
    HEADING_STATUS_RE.get_or_init(|| {
        Regex::new(r"(?m)^#{2,6}[ \t]+T\d{3}\b[^\n]*\n\s*\*\*Status\*\*:").unwrap()
    })
}

fn task_line_re() -> &'static Regex {
    TASK_LINE_RE.get_or_init(|| {
        Regex::new(r"(?m)^(?:#{2,6}[ \t]+|- \[[ xX]\][ \t]+)T\d{3}\b[^\n]*").unwrap()
    })
}

fn checkbox_line_re() -> &'static Regex {
    CHECKBOX_LINE_RE.get_or_init(|| Regex::new(r"(?m)^- \[[ xX]\][ \t]+T\d{3}\b").unwrap())
}

fn heading_line_re() -> &'static Regex {
    HEADING_LINE_RE.get_or_init(|| Regex::new(r"(?m)^#{2,6}[ \t]+T\d{3}\b").unwrap())
}

/// Pick the convention a document is written in.
///
/// Order: heading + status line, a trailing emoji on any task line, checkbox lines,
/// bare task headings (annotated with emoji), and checkbox as the fallback.
pub fn detect_convention(text: &str) -> Convention {
    if heading_status_re().is_match(text) {
        return Convention::Heading;
    }
    if task_line_re()
        .find_iter(text)
        .any(|m| codec::decode_emoji(m.as_str()).is_some())
    {
        return Convention::Emoji;
    }
    if checkbox_line_re().is_match(text) {
        return Convention::Checkbox;
    }
    if heading_line_re().is_match(text) {
        return Convention::Emoji;
    }
    Convention::Checkbox
}

pub fn resolve_convention(choice: ConventionChoice, text: &str) -> Convention {
    match choice {
        ConventionChoice::Fixed(c) => c,
        ConventionChoice::Auto => detect_convention(text),
    }
}

// ---------------------------------------------------------------------------
// Locating a single task
// ---------------------------------------------------------------------------

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| SpecKitError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Every occurrence of `task_id` under `convention`, in document order.
///
/// Patterns are line-anchored in multi-line mode, so each candidate line is
/// matched independently. An empty result means "not found"; a document
/// written under another convention is indistinguishable from a missing task.
pub fn locate(text: &str, task_id: &str, convention: Convention) -> Result<Vec<TaskMatch>> {
    let id = regex::escape(task_id);
    match convention {
        Convention::Checkbox => {
            let re = compile(&format!(r"(?m)^- \[([ xX])\] {id}:"))?;
            Ok(re
                .captures_iter(text)
                .filter_map(|caps| {
                    let whole = caps.get(0)?;
                    let mark = caps.get(1)?;
                    Some(TaskMatch {
                        span: whole.range(),
                        markers: vec![Marker {
                            kind: MarkerKind::Checkbox,
                            range: mark.range(),
                        }],
                    })
                })
                .collect())
        }
        Convention::Heading => {
            let re = compile(&format!(
                r"(?m)^#{{2,6}}[ \t]+{id}\b[^\n]*\n\s*\*\*Status\*\*:[ \t]*([A-Za-z_-]+)"
            ))?;
            Ok(re
                .captures_iter(text)
                .filter_map(|caps| {
                    let whole = caps.get(0)?;
                    let word = caps.get(1)?;
                    Some(TaskMatch {
                        span: whole.range(),
                        markers: vec![Marker {
                            kind: MarkerKind::StatusWord,
                            range: word.range(),
                        }],
                    })
                })
                .collect())
        }
        Convention::Emoji => {
            let re = compile(&format!(
                r"(?m)^(?:#{{2,6}}[ \t]+|- \[([ xX])\][ \t]+){id}\b[^\n]*"
            ))?;
            Ok(re
                .captures_iter(text)
                .filter_map(|caps| {
                    let whole = caps.get(0)?;
                    let line = whole.as_str();
                    let content = line.strip_suffix('\r').unwrap_or(line);
                    let content_end = whole.start() + content.len();
                    let kept_end = whole.start() + codec::strip_emoji(content).len();

                    let mut markers = Vec::with_capacity(2);
                    if let Some(mark) = caps.get(1) {
                        markers.push(Marker {
                            kind: MarkerKind::Checkbox,
                            range: mark.range(),
                        });
                    }
                    markers.push(Marker {
                        kind: MarkerKind::Emoji,
                        range: kept_end..content_end,
                    });
                    Some(TaskMatch {
                        span: whole.range(),
                        markers,
                    })
                })
                .collect())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
