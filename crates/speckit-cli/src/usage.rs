use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;

/// Parse arguments, set up logging, and run one tool.
///
/// A tool returns `Ok(false)` when its check failed; that, an error, or
/// malformed arguments all exit with status 1. Malformed arguments print the
/// tool's full help to stdout instead of clap's terse error.
pub fn run_tool<A: Parser>(run: fn(A) -> anyhow::Result<bool>) -> ExitCode {
    let args = match A::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "argument parsing failed");
            println!("Error: Invalid arguments");
            println!();
            let _ = A::command().print_long_help();
            return ExitCode::from(1);
        }
    };

    init_tracing();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
