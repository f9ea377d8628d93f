//! Mapping between [`TaskStatus`] values and their markdown markers.
//!
//! Three marker shapes exist in tasks documents: the checkbox character, the
//! `**Status**: <word>` word, and a status emoji appended to a task line.

use crate::types::TaskStatus;
use serde::Serialize;

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Which part of a task line carries its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Checkbox,
    StatusWord,
    Emoji,
}

/// Replacement text for a marker of `kind`.
///
/// An emoji marker covers the trailing annotation of a line including the
/// separating space, so its encoding carries that space.
pub fn encode(kind: MarkerKind, status: TaskStatus) -> String {
    match kind {
        MarkerKind::Checkbox => checkbox_char(status).to_string(),
        MarkerKind::StatusWord => status.as_str().to_string(),
        MarkerKind::Emoji => format!(" {}", emoji(status)),
    }
}

// ---------------------------------------------------------------------------
// Checkbox
// ---------------------------------------------------------------------------

/// Only `completed` checks the box.
pub fn checkbox_char(status: TaskStatus) -> char {
    match status {
        TaskStatus::Completed => 'x',
        _ => ' ',
    }
}

pub fn decode_checkbox(mark: &str) -> TaskStatus {
    if mark.eq_ignore_ascii_case("x") {
        TaskStatus::Completed
    } else {
        TaskStatus::Pending
    }
}

// ---------------------------------------------------------------------------
// Status word
// ---------------------------------------------------------------------------

pub fn decode_word(word: &str) -> Option<TaskStatus> {
    word.parse().ok()
}

// ---------------------------------------------------------------------------
// Emoji
// ---------------------------------------------------------------------------

pub fn emoji(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "⏳",
        TaskStatus::InProgress => "🔄",
        TaskStatus::Completed => "✅",
        TaskStatus::Blocked => "🚫",
    }
}

/// Split the last status emoji off the end of `text`, ignoring trailing
/// whitespace and variation selectors.
fn split_trailing_emoji(text: &str) -> Option<(&str, TaskStatus)> {
    let trimmed = text.trim_end_matches(|c: char| c.is_whitespace() || c == VARIATION_SELECTOR);
    TaskStatus::all().iter().find_map(|status| {
        trimmed
            .strip_suffix(emoji(*status))
            .map(|rest| (rest, *status))
    })
}

/// The status carried by the trailing emoji annotation of `text`, if any.
///
/// Emoji inside a description are text, not markers.
pub fn decode_emoji(text: &str) -> Option<TaskStatus> {
    split_trailing_emoji(text).map(|(_, status)| status)
}

/// `text` without its trailing run of status emoji and the whitespace that
/// separates them. Text without an annotation is returned unchanged.
///
/// Repeated annotations (`Title ✅ ⏳`) are all removed so re-annotating never
/// accumulates markers.
pub fn strip_emoji(text: &str) -> &str {
    let mut rest = text;
    while let Some((before, _)) = split_trailing_emoji(rest) {
        rest = before.trim_end();
    }
    rest
}

/// `text` with any prior status emoji replaced by the one for `status`.
pub fn annotate(text: &str, status: TaskStatus) -> String {
    format!("{}{}", strip_emoji(text), encode(MarkerKind::Emoji, status))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_roundtrip_for_binary_set() {
        for status in [TaskStatus::Pending, TaskStatus::Completed] {
            let mark = encode(MarkerKind::Checkbox, status);
            assert_eq!(decode_checkbox(&mark), status);
        }
        assert_eq!(decode_checkbox("X"), TaskStatus::Completed);
    }

    #[test]
    fn every_status_has_a_distinct_emoji() {
        let seen: std::collections::HashSet<&str> =
            TaskStatus::all().iter().map(|s| emoji(*s)).collect();
        assert_eq!(seen.len(), TaskStatus::all().len());
        for status in TaskStatus::all() {
            assert_eq!(decode_emoji(emoji(*status)), Some(*status));
        }
    }

    #[test]
    fn decode_emoji_reads_only_the_trailing_annotation() {
        assert_eq!(decode_emoji("Build ⏳ then ✅"), Some(TaskStatus::Completed));
        assert_eq!(decode_emoji("Ship 🔄 \u{FE0F} "), Some(TaskStatus::InProgress));
        assert_eq!(decode_emoji("Replace ✅ icon in toolbar"), None);
        assert_eq!(decode_emoji("no marker"), None);
    }

    #[test]
    fn strip_emoji_leaves_unannotated_text_alone() {
        assert_eq!(strip_emoji("Build  "), "Build  ");
        assert_eq!(strip_emoji("Replace ✅ icon"), "Replace ✅ icon");
        assert_eq!(strip_emoji("Replace ✅ icon ⏳"), "Replace ✅ icon");
    }

    #[test]
    fn annotate_replaces_prior_markers() {
        assert_eq!(
            annotate("### T001: Build ⏳", TaskStatus::Completed),
            "### T001: Build ✅"
        );
        assert_eq!(
            annotate("### T001: Build ✅ 🔄  ", TaskStatus::Blocked),
            "### T001: Build 🚫"
        );
        assert_eq!(
            annotate("### T001: Build", TaskStatus::InProgress),
            "### T001: Build 🔄"
        );
    }

    #[test]
    fn strip_emoji_handles_variation_selector() {
        assert_eq!(strip_emoji("Ship it ✅\u{FE0F}"), "Ship it");
    }

    #[test]
    fn annotate_is_idempotent() {
        let once = annotate("- [ ] T002: Docs", TaskStatus::Pending);
        assert_eq!(annotate(&once, TaskStatus::Pending), once);
    }
}
