use crate::error::SpecKitError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Blocked,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = SpecKitError;

    /// Case-insensitive against the canonical words of the extended set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        TaskStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == lower)
            .ok_or_else(|| SpecKitError::InvalidStatus {
                status: s.to_string(),
                allowed: StatusSet::Extended.allowed(),
            })
    }
}

// ---------------------------------------------------------------------------
// StatusSet
// ---------------------------------------------------------------------------

/// The closed enumeration a convention can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSet {
    Binary,
    Extended,
}

impl StatusSet {
    pub fn members(self) -> &'static [TaskStatus] {
        match self {
            StatusSet::Binary => &[TaskStatus::Pending, TaskStatus::Completed],
            StatusSet::Extended => TaskStatus::all(),
        }
    }

    pub fn contains(self, status: TaskStatus) -> bool {
        self.members().contains(&status)
    }

    /// Comma-separated canonical words, for error messages.
    pub fn allowed(self) -> String {
        self.members()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parse `raw` and require membership in this set.
    pub fn parse(self, raw: &str) -> Result<TaskStatus, SpecKitError> {
        let invalid = || SpecKitError::InvalidStatus {
            status: raw.to_string(),
            allowed: self.allowed(),
        };
        let status: TaskStatus = raw.parse().map_err(|_| invalid())?;
        if !self.contains(status) {
            return Err(invalid());
        }
        Ok(status)
    }
}

// ---------------------------------------------------------------------------
// Convention
// ---------------------------------------------------------------------------

/// A textual encoding of task status inside a tasks document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    /// `- [ ] T001: ...` / `- [x] T001: ...`
    Checkbox,
    /// A status emoji appended to a heading or checkbox task line.
    Emoji,
    /// `### T001: ...` followed by a `**Status**: <word>` line.
    Heading,
}

impl Convention {
    pub fn all() -> &'static [Convention] {
        &[Convention::Checkbox, Convention::Emoji, Convention::Heading]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Convention::Checkbox => "checkbox",
            Convention::Emoji => "emoji",
            Convention::Heading => "heading",
        }
    }

    pub fn status_set(self) -> StatusSet {
        match self {
            Convention::Checkbox => StatusSet::Binary,
            Convention::Emoji | Convention::Heading => StatusSet::Extended,
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Convention {
    type Err = SpecKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checkbox" => Ok(Convention::Checkbox),
            "emoji" => Ok(Convention::Emoji),
            "heading" => Ok(Convention::Heading),
            _ => Err(SpecKitError::UnknownConvention(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
