mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::CliError;

/// Exit code when the command ran but its envelope carries errors.
const ENVELOPE_ERROR_EXIT: u8 = 3;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli);
    logging::init(&settings.log_filter)?;

    let rendered = commands::run(&cli, &settings)?;
    let envelope = &rendered.envelope;
    output::render(envelope, rendered.table.as_ref(), cli.format, cli.pretty)?;

    if cli.strict && (!envelope.meta.warnings.is_empty() || !envelope.errors.is_empty()) {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.meta.warnings.len(),
            error_count: envelope.errors.len(),
        });
    }

    if envelope.errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(ENVELOPE_ERROR_EXIT))
    }
}
