use crate::output::{print_json, print_rule, print_table};
use anyhow::Context;
use clap::Parser;
use speckit_core::{
    config::{ConventionChoice, UpdateConfig},
    document::Document,
    lister::{self, TaskEntry},
    locator,
    types::Convention,
    updater,
};
use std::path::{Path, PathBuf};

/// Update task status in a tasks.md file, or list every task with its status.
///
/// With only TASKS_FILE, lists tasks. With TASK_ID and STATUS, rewrites the
/// status marker of that task and nothing else.
#[derive(Debug, Parser)]
#[command(
    name = "update-task-status",
    version,
    after_long_help = "Examples:\n  \
        update-task-status specs/features/autocomplete/tasks.md\n  \
        update-task-status specs/features/autocomplete/tasks.md T001 completed\n  \
        update-task-status specs/defects/pagination/tasks.md T005 in_progress --convention heading"
)]
pub struct TaskStatusArgs {
    /// Path to the tasks.md file
    pub tasks_file: PathBuf,

    /// Task identifier, e.g. T001 (case-insensitive)
    #[arg(requires = "status")]
    pub task_id: Option<String>,

    /// New status: pending, in_progress, completed or blocked
    pub status: Option<String>,

    /// Status convention: auto, checkbox, emoji or heading
    #[arg(long, default_value = "auto")]
    pub convention: ConventionChoice,

    /// Fail instead of rewriting every occurrence of a duplicated task ID
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long, short = 'j')]
    pub json: bool,
}

pub fn run(args: TaskStatusArgs) -> anyhow::Result<bool> {
    let config = UpdateConfig {
        convention: args.convention,
        ..UpdateConfig::default()
    }
    .strict(args.strict);

    match (args.task_id.as_deref(), args.status.as_deref()) {
        (Some(task_id), Some(status)) => {
            update(&args.tasks_file, task_id, status, &config, args.json)
        }
        _ => list(&args.tasks_file, config.convention, args.json),
    }
}

fn update(
    path: &Path,
    task_id: &str,
    status: &str,
    config: &UpdateConfig,
    json: bool,
) -> anyhow::Result<bool> {
    let outcome = updater::update_task_status(path, task_id, status, config)
        .with_context(|| format!("failed to update {}", path.display()))?;

    if let Some(warning) = outcome.duplicate_warning() {
        eprintln!("Warning: {warning}");
    }

    if json {
        print_json(&outcome)?;
    } else if outcome.changed {
        println!("✓ Updated {} to '{}'", outcome.task_id, outcome.status);
    } else {
        println!("✓ {} is already '{}'", outcome.task_id, outcome.status);
    }
    Ok(true)
}

#[derive(serde::Serialize)]
struct Listing<'a> {
    path: String,
    convention: Convention,
    tasks: &'a [TaskEntry],
}

fn list(path: &Path, choice: ConventionChoice, json: bool) -> anyhow::Result<bool> {
    let doc = Document::load(path).with_context(|| format!("failed to read {}", path.display()))?;
    let convention = locator::resolve_convention(choice, &doc.text);
    let tasks = lister::list_tasks(&doc.text, convention);
    tracing::debug!(%convention, count = tasks.len(), "listed tasks");

    if json {
        print_json(&Listing {
            path: path.display().to_string(),
            convention,
            tasks: &tasks,
        })?;
        return Ok(true);
    }

    println!();
    println!("Tasks in {} ({convention}):", path.display());
    print_rule();
    if tasks.is_empty() {
        println!("No tasks found.");
    } else {
        let rows: Vec<Vec<String>> = tasks
            .iter()
            .map(|t| {
                let ellipsis = if t.truncated { "..." } else { "" };
                vec![
                    t.id.clone(),
                    t.status.to_string(),
                    format!("{}{ellipsis}", t.description),
                ]
            })
            .collect();
        print_table(&["ID", "STATUS", "DESCRIPTION"], rows);
    }
    print_rule();
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_mode() {
        let args = TaskStatusArgs::parse_from(["update-task-status", "tasks.md"]);
        assert!(args.task_id.is_none());
        assert_eq!(args.convention, ConventionChoice::Auto);
    }

    #[test]
    fn parses_update_mode_with_flags() {
        let args = TaskStatusArgs::parse_from([
            "update-task-status",
            "tasks.md",
            "t001",
            "Completed",
            "--convention",
            "heading",
            "--strict",
        ]);
        assert_eq!(args.task_id.as_deref(), Some("t001"));
        assert_eq!(args.status.as_deref(), Some("Completed"));
        assert_eq!(args.convention, ConventionChoice::Fixed(Convention::Heading));
        assert!(args.strict);
    }

    #[test]
    fn task_id_without_status_is_rejected() {
        assert!(TaskStatusArgs::try_parse_from(["update-task-status", "tasks.md", "T001"]).is_err());
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(TaskStatusArgs::try_parse_from([
            "update-task-status",
            "tasks.md",
            "T001",
            "completed",
            "extra"
        ])
        .is_err());
    }
}
