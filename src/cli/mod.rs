//! Command-line layer: argument parsing, the run pipeline, and output.

use std::io;

use anyhow::Result;

mod args;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, STDIN_PATH};
pub use exit_status::ExitStatus;
pub use report::{Diagnostics, print_report_to, print_stale_warning_to};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    run::run(args, &mut stdout.lock(), &mut stderr.lock())?;
    Ok(ExitStatus::Success)
}
