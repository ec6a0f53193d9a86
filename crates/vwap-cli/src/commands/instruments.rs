use serde_json::json;

use crate::cli::SourceArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::text_table::TextTable;

use super::{open_session, zero_volume_warning, CommandResult};

pub fn run(args: &SourceArgs, settings: &Settings) -> Result<CommandResult, CliError> {
    let session = open_session(&args.file, settings)?;
    let rows = session.instrument_vwaps();

    let warnings = zero_volume_warning(rows.iter().map(|row| row.vwap))
        .into_iter()
        .collect();

    Ok(CommandResult::ok(json!({ "rows": rows }))
        .with_table(TextTable::from_rows(&rows))
        .with_warnings(warnings)
        .with_source(&session, &args.file))
}
