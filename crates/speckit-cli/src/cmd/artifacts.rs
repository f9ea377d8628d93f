use crate::output::{print_json, print_rule};
use anyhow::Context;
use clap::Parser;
use speckit_core::artifact::{self, ArtifactKind};
use std::path::PathBuf;

/// Validate spec artifacts (requirements.md, plan.md, tasks.md) before
/// implementation begins.
#[derive(Debug, Parser)]
#[command(
    name = "validate-spec-artifacts",
    version,
    after_long_help = "Examples:\n  \
        validate-spec-artifacts specs/features/autocomplete-improvements\n  \
        validate-spec-artifacts specs/defects/pagination-bug"
)]
pub struct ArtifactsArgs {
    /// Directory holding the spec artifacts
    pub spec_directory: PathBuf,

    /// Output as JSON
    #[arg(long, short = 'j')]
    pub json: bool,
}

pub fn run(args: ArtifactsArgs) -> anyhow::Result<bool> {
    let dir = &args.spec_directory;
    let report = artifact::validate_spec_directory(dir)
        .with_context(|| format!("failed to validate {}", dir.display()))?;

    if args.json {
        print_json(&report)?;
        return Ok(report.passed());
    }

    println!("Validating spec artifacts in: {}", dir.display());
    print_rule();

    if report.passed() {
        println!("✅ All spec artifacts are valid and ready for implementation!");
        print_rule();
        println!("\nFound files:");
        for file in &report.files {
            println!("  ✓ {} ({} bytes)", file.name, file.bytes);
        }
        return Ok(true);
    }

    println!("❌ Validation failed with the following errors:\n");
    for failure in &report.failures {
        println!("  • {failure}");
    }
    println!();
    print_rule();
    println!("\nThe spec directory should contain:");
    for kind in ArtifactKind::all() {
        let sections: Vec<&str> = kind
            .required_sections()
            .iter()
            .map(|s| s.trim_start_matches("## "))
            .collect();
        println!("  - {} (with {})", kind.filename(), sections.join(", "));
    }
    println!("  - at least one task heading in tasks.md (### T001: ...)");
    Ok(false)
}
