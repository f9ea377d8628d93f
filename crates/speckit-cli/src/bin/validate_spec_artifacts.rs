use speckit_cli::{cmd::artifacts, usage};
use std::process::ExitCode;

fn main() -> ExitCode {
    usage::run_tool(artifacts::run)
}
