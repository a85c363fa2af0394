#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use esroll_cli::args::CliArgs;
use esroll_cli::driver::{self, RunOutcome};
use esroll_cli::reporter::Reporter;

const EXIT_BUNDLE_FAILED: i32 = 1;

fn main() -> Result<()> {
    // ESROLL_LOG / ESROLL_LOG_FORMAT, see esroll::tracing_config.
    esroll::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    match driver::run(&args, &cwd)? {
        RunOutcome::Printed(text) => print!("{text}"),
        RunOutcome::Written(path) => tracing::debug!(output = %path.display(), "wrote bundle"),
        RunOutcome::Failed(error) => {
            let pretty = args
                .pretty
                .unwrap_or_else(|| std::io::stderr().is_terminal());
            let mut reporter = Reporter::new(pretty);
            eprintln!("{}", reporter.render(&error));
            std::process::exit(EXIT_BUNDLE_FAILED);
        }
    }
    Ok(())
}
