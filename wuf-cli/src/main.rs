//! CLI entry point for `wuf`.
//!
//! Parses command-line arguments with clap, installs logging from the parsed
//! verbosity, builds a forest from the requested edge list, renders the report
//! and maps failures to a non-zero exit code.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tracing::{error, field};
use wuf_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingConfig, LoggingError},
    output,
};

/// Execute the parsed command and write its report.
fn try_main(cli: &Cli) -> Result<()> {
    let report = run_cli(cli).context("failed to execute command")?;
    output::emit(&report, cli.format, cli.outfile.as_deref()).context("failed to write report")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_verbosity(cli.verbose, cli.quiet)
        .and_then(|config| logging::init_logging(&config));
    if let Err(err) = logging {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main(&cli) {
        let code = err.downcast_ref::<CliError>().and_then(CliError::code);
        let message = format!("{err:#}");
        error!(
            error = message.as_str(),
            code = code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
