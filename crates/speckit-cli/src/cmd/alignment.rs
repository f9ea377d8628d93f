use crate::output::{print_json, print_rule};
use anyhow::Context;
use clap::Parser;
use speckit_core::{alignment, config::AlignmentConfig};
use std::path::PathBuf;

/// Check that the artifact templates promise the sections and task format
/// the artifact validator expects.
#[derive(Debug, Parser)]
#[command(
    name = "validate-skill-alignment",
    version,
    after_long_help = "Example:\n  validate-skill-alignment --skills-dir ~/.claude/skills"
)]
pub struct AlignmentArgs {
    /// Path to skills directory (default: ~/.claude/skills)
    #[arg(long)]
    pub skills_dir: Option<PathBuf>,

    /// Validator source to read expectations from
    /// (default: <skills-dir>/implementing-specs/scripts/validate_spec_artifacts.py)
    #[arg(long)]
    pub validator: Option<PathBuf>,

    /// Template document to read promises from
    /// (default: <skills-dir>/spec-driven-dev/references/templates.md)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, short = 'j')]
    pub json: bool,
}

impl AlignmentArgs {
    pub fn config(&self) -> anyhow::Result<AlignmentConfig> {
        let base = match &self.skills_dir {
            Some(dir) => AlignmentConfig::for_skills_dir(dir.clone()),
            None => AlignmentConfig::for_home(home::home_dir().as_deref())?,
        };
        Ok(base
            .with_validator(self.validator.clone())
            .with_template(self.template.clone()))
    }
}

pub fn run(args: AlignmentArgs) -> anyhow::Result<bool> {
    let config = args.config()?;
    let report = alignment::check_alignment(&config).context("failed to check skill alignment")?;

    if args.json {
        print_json(&report)?;
        return Ok(report.passed());
    }

    println!("Validating skill alignment...");
    println!("Skills directory: {}", config.skills_dir.display());
    print_rule();

    if report.issues.is_empty() {
        println!("✅ All checks passed! Skills are properly aligned.");
        return Ok(true);
    }

    let errors: Vec<_> = report.errors().collect();
    let warnings: Vec<_> = report.warnings().collect();

    if !errors.is_empty() {
        println!("\nErrors found:");
        for issue in &errors {
            println!("  {issue}");
        }
    }
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for issue in &warnings {
            println!("  {issue}");
        }
    }

    println!();
    print_rule();
    println!(
        "Summary: {} error(s), {} warning(s)",
        errors.len(),
        warnings.len()
    );

    if !errors.is_empty() {
        println!("\n⚠️  Fix errors before using these skills together");
    }
    Ok(report.passed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_skills_dir_sets_default_paths() {
        let args = AlignmentArgs::parse_from(["validate-skill-alignment", "--skills-dir", "/s"]);
        let config = args.config().unwrap();
        assert_eq!(config.skills_dir, PathBuf::from("/s"));
        assert_eq!(
            config.template_path,
            PathBuf::from("/s/spec-driven-dev/references/templates.md")
        );
    }

    #[test]
    fn individual_paths_override_layout() {
        let args = AlignmentArgs::parse_from([
            "validate-skill-alignment",
            "--skills-dir",
            "/s",
            "--validator",
            "/v/artifact.rs",
        ]);
        let config = args.config().unwrap();
        assert_eq!(config.validator_path, PathBuf::from("/v/artifact.rs"));
    }
}
