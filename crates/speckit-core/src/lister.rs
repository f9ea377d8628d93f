use crate::codec;
use crate::types::{Convention, TaskStatus};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const DESCRIPTION_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEntry {
    pub id: String,
    /// At most [`DESCRIPTION_WIDTH`] characters.
    pub description: String,
    /// True when `description` was cut.
    pub truncated: bool,
    pub status: TaskStatus,
}

impl TaskEntry {
    fn new(id: &str, description: &str, status: TaskStatus) -> Self {
        let description = codec::strip_emoji(description.trim()).trim();
        let truncated = description.chars().count() > DESCRIPTION_WIDTH;
        Self {
            id: id.to_string(),
            description: description.chars().take(DESCRIPTION_WIDTH).collect(),
            truncated,
            status,
        }
    }
}

static CHECKBOX_RE: OnceLock<Regex> = OnceLock::new();
static EMOJI_LINE_RE: OnceLock<Regex> = OnceLock::new();
static TASK_HEADING_RE: OnceLock<Regex> = OnceLock::new();
static STATUS_LINE_RE: OnceLock<Regex> = OnceLock::new();

fn checkbox_re() -> &'static Regex {
    CHECKBOX_RE.get_or_init(|| Regex::new(r"(?m)^- \[([ xX])\] (T\d{3}):[ \t]+([^\n]+)").unwrap())
}

fn emoji_line_re() -> &'static Regex {
    EMOJI_LINE_RE.get_or_init(|| {
        Regex::new(r"(?m)^(?:#{2,6}[ \t]+|- \[([ xX])\][ \t]+)(T\d{3})\b:?[ \t]*([^\n]*)").unwrap()
    })
}

fn task_heading_re() -> &'static Regex {
    TASK_HEADING_RE
        .get_or_init(|| Regex::new(r"(?m)^#{2,6}[ \t]+(T\d{3})\b:?[ \t]*([^\n]*)").unwrap())
}

fn status_line_re() -> &'static Regex {
    STATUS_LINE_RE
        .get_or_init(|| Regex::new(r"\A\s*\*\*Status\*\*:[ \t]*([A-Za-z_-]+)").unwrap())
}

/// Every task in `text` under `convention`, in first-appearance order.
///
/// Never fails: an entry whose status marker is absent or unrecognised is
/// reported as pending. A heading's status line counts only when nothing but
/// whitespace separates it from the heading, the same rule updates use.
pub fn list_tasks(text: &str, convention: Convention) -> Vec<TaskEntry> {
    match convention {
        Convention::Checkbox => checkbox_re()
            .captures_iter(text)
            .map(|caps| {
                TaskEntry::new(
                    &caps[2],
                    &caps[3],
                    codec::decode_checkbox(&caps[1]),
                )
            })
            .collect(),
        Convention::Emoji => emoji_line_re()
            .captures_iter(text)
            .map(|caps| {
                let rest = &caps[3];
                let status = codec::decode_emoji(rest)
                    .or_else(|| caps.get(1).map(|m| codec::decode_checkbox(m.as_str())))
                    .unwrap_or(TaskStatus::Pending);
                TaskEntry::new(&caps[2], rest, status)
            })
            .collect(),
        Convention::Heading => task_heading_re()
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let status = status_line_re()
                    .captures(&text[whole.end()..])
                    .and_then(|c| codec::decode_word(&c[1]))
                    .unwrap_or(TaskStatus::Pending);
                Some(TaskEntry::new(&caps[1], &caps[2], status))
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entries: &[TaskEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn preserves_document_order() {
        let text = "- [ ] T003: Third\n- [x] T001: First\n- [ ] T002: Second\n";
        let entries = list_tasks(text, Convention::Checkbox);
        assert_eq!(ids(&entries), vec!["T003", "T001", "T002"]);
        assert_eq!(entries[1].status, TaskStatus::Completed);
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let long = "x".repeat(80);
        let text = format!("- [ ] T001: {long}\n");
        let entry = &list_tasks(&text, Convention::Checkbox)[0];
        assert_eq!(entry.description.chars().count(), DESCRIPTION_WIDTH);
        assert!(entry.truncated);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = format!("- [ ] T001: {}\n", "é".repeat(61));
        let entry = &list_tasks(&text, Convention::Checkbox)[0];
        assert_eq!(entry.description, "é".repeat(60));
    }

    #[test]
    fn heading_status_comes_from_status_line() {
        let text = "### T002: Ship\n**Status**: blocked\n\n### T001: Build\nNotes\n\n### T004: Odd\n**Status**: someday\n";
        let entries = list_tasks(text, Convention::Heading);
        assert_eq!(ids(&entries), vec!["T002", "T001", "T004"]);
        assert_eq!(entries[0].status, TaskStatus::Blocked);
        assert_eq!(entries[1].status, TaskStatus::Pending);
        assert_eq!(entries[2].status, TaskStatus::Pending);
        assert_eq!(entries[0].description, "Ship");
    }

    #[test]
    fn heading_status_does_not_leak_from_next_task() {
        let text = "### T001: A\n### T002: B\n**Status**: completed\n";
        let entries = list_tasks(text, Convention::Heading);
        assert_eq!(entries[0].status, TaskStatus::Pending);
        assert_eq!(entries[1].status, TaskStatus::Completed);
    }

    #[test]
    fn heading_status_must_follow_the_heading() {
        let text = "### T001: A\nNotes here\n**Status**: completed\n";
        let entries = list_tasks(text, Convention::Heading);
        assert_eq!(entries[0].status, TaskStatus::Pending);
        assert!(crate::locator::locate(text, "T001", Convention::Heading)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn heading_status_line_without_word_is_pending() {
        let entries = list_tasks("### T001: A\n**Status**:\n", Convention::Heading);
        assert_eq!(entries[0].status, TaskStatus::Pending);
    }

    #[test]
    fn checkbox_state_wins_over_emoji_in_description() {
        let text = "- [ ] T001: Replace ✅ icon in toolbar\n- [x] T002: Fix ⏳ spinner\n";
        let statuses: Vec<TaskStatus> = list_tasks(text, Convention::Emoji)
            .iter()
            .map(|e| e.status)
            .collect();
        assert_eq!(statuses, vec![TaskStatus::Pending, TaskStatus::Completed]);
        assert_eq!(
            list_tasks(text, Convention::Checkbox)[0].description,
            "Replace ✅ icon in toolbar"
        );
    }

    #[test]
    fn emoji_entries_strip_the_symbol() {
        let text = "### T001: Build 🔄\n- [x] T002: Docs\n- [ ] T003: Ship ✅\n";
        let entries = list_tasks(text, Convention::Emoji);
        assert_eq!(entries[0].description, "Build");
        assert_eq!(entries[0].status, TaskStatus::InProgress);
        assert_eq!(entries[1].status, TaskStatus::Completed);
        assert_eq!(entries[2].status, TaskStatus::Completed);
    }

    #[test]
    fn empty_document_lists_nothing() {
        for convention in Convention::all() {
            assert!(list_tasks("", *convention).is_empty());
        }
    }
}
