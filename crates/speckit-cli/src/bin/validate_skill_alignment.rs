use speckit_cli::{cmd::alignment, usage};
use std::process::ExitCode;

fn main() -> ExitCode {
    usage::run_tool(alignment::run)
}
