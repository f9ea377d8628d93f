use crate::error::{Result, SpecKitError};
use crate::paths;
use crate::types::Convention;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConventionChoice
// ---------------------------------------------------------------------------

/// Either a fixed convention or detection from document content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConventionChoice {
    #[default]
    Auto,
    Fixed(Convention),
}

impl fmt::Display for ConventionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConventionChoice::Auto => f.write_str("auto"),
            ConventionChoice::Fixed(c) => write!(f, "{c}"),
        }
    }
}

impl std::str::FromStr for ConventionChoice {
    type Err = SpecKitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(ConventionChoice::Auto);
        }
        s.parse().map(ConventionChoice::Fixed)
    }
}

// ---------------------------------------------------------------------------
// DuplicatePolicy
// ---------------------------------------------------------------------------

/// What to do when a task identifier matches more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Rewrite every occurrence and report a warning.
    #[default]
    RewriteAll,
    /// Refuse to touch the document.
    Fail,
}

// ---------------------------------------------------------------------------
// UpdateConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateConfig {
    #[serde(default)]
    pub convention: ConventionChoice,
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

impl UpdateConfig {
    pub fn strict(mut self, strict: bool) -> Self {
        if strict {
            self.duplicates = DuplicatePolicy::Fail;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// AlignmentConfig
// ---------------------------------------------------------------------------

/// Locations of the two documents compared by the alignment checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    pub skills_dir: PathBuf,
    pub validator_path: PathBuf,
    pub template_path: PathBuf,
}

impl AlignmentConfig {
    /// Standard layout under `skills_dir`.
    pub fn for_skills_dir(skills_dir: impl Into<PathBuf>) -> Self {
        let skills_dir = skills_dir.into();
        Self {
            validator_path: paths::validator_script_path(&skills_dir),
            template_path: paths::templates_path(&skills_dir),
            skills_dir,
        }
    }

    /// Standard layout under `<home>/.claude/skills`.
    pub fn for_home(home: Option<&Path>) -> Result<Self> {
        let home = home.ok_or(SpecKitError::HomeNotFound)?;
        Ok(Self::for_skills_dir(paths::default_skills_dir(home)))
    }

    pub fn with_validator(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.validator_path = p;
        }
        self
    }

    pub fn with_template(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.template_path = p;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_config_defaults() {
        let config = UpdateConfig::default();
        assert_eq!(config.convention, ConventionChoice::Auto);
        assert_eq!(config.duplicates, DuplicatePolicy::RewriteAll);
        assert_eq!(config.strict(true).duplicates, DuplicatePolicy::Fail);
    }

    #[test]
    fn convention_choice_parse() {
        assert_eq!(
            "AUTO".parse::<ConventionChoice>().unwrap(),
            ConventionChoice::Auto
        );
        assert_eq!(
            "heading".parse::<ConventionChoice>().unwrap(),
            ConventionChoice::Fixed(Convention::Heading)
        );
        assert!("table".parse::<ConventionChoice>().is_err());
    }

    #[test]
    fn alignment_config_layout() {
        let config = AlignmentConfig::for_home(Some(Path::new("/home/dev"))).unwrap();
        assert_eq!(config.skills_dir, PathBuf::from("/home/dev/.claude/skills"));
        assert!(config
            .validator_path
            .ends_with("implementing-specs/scripts/validate_spec_artifacts.py"));
        assert!(config
            .template_path
            .ends_with("spec-driven-dev/references/templates.md"));
    }

    #[test]
    fn alignment_config_overrides() {
        let config = AlignmentConfig::for_skills_dir("/skills")
            .with_validator(Some(PathBuf::from("/tmp/validator.py")))
            .with_template(None);
        assert_eq!(config.validator_path, PathBuf::from("/tmp/validator.py"));
        assert_eq!(
            config.template_path,
            PathBuf::from("/skills/spec-driven-dev/references/templates.md")
        );
    }

    #[test]
    fn missing_home_is_an_error() {
        assert!(matches!(
            AlignmentConfig::for_home(None),
            Err(SpecKitError::HomeNotFound)
        ));
    }
}
