use speckit_cli::{cmd::task_status, usage};
use std::process::ExitCode;

fn main() -> ExitCode {
    usage::run_tool(task_status::run)
}
