use crate::error::{Result, SpecKitError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

pub const REQUIREMENTS_FILE: &str = "requirements.md";
pub const PLAN_FILE: &str = "plan.md";
pub const TASKS_FILE: &str = "tasks.md";

pub const SKILLS_DIR: &str = ".claude/skills";
pub const VALIDATOR_SCRIPT: &str = "implementing-specs/scripts/validate_spec_artifacts.py";
pub const TEMPLATES_FILE: &str = "spec-driven-dev/references/templates.md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn default_skills_dir(home: &Path) -> PathBuf {
    home.join(SKILLS_DIR)
}

pub fn validator_script_path(skills_dir: &Path) -> PathBuf {
    skills_dir.join(VALIDATOR_SCRIPT)
}

pub fn templates_path(skills_dir: &Path) -> PathBuf {
    skills_dir.join(TEMPLATES_FILE)
}

// ---------------------------------------------------------------------------
// Task ID validation
// ---------------------------------------------------------------------------

static TASK_ID_RE: OnceLock<Regex> = OnceLock::new();

fn task_id_re() -> &'static Regex {
    TASK_ID_RE.get_or_init(|| Regex::new(r"^T\d{3}$").unwrap())
}

/// Uppercase `raw` and check it is `T` followed by exactly three digits.
pub fn normalize_task_id(raw: &str) -> Result<String> {
    let id = raw.trim().to_uppercase();
    if !task_id_re().is_match(&id) {
        return Err(SpecKitError::InvalidTaskId(id));
    }
    Ok(id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
