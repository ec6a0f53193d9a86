use serde_json::json;
use tracing::info;
use vwap_core::{EnvelopeError, SessionError};

use crate::cli::FilterArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::text_table::TextTable;

use super::{open_session, zero_volume_warning, CommandResult};

pub fn run(args: &FilterArgs, settings: &Settings) -> Result<CommandResult, CliError> {
    let path = &args.source.file;
    let mut session = open_session(path, settings)?;

    let filtered = match session.select_epic(&args.epic) {
        Ok(filtered) => filtered,
        Err(SessionError::Aggregation(error)) => {
            info!(epic = %args.epic, "epic not present in trade file");
            return Ok(CommandResult::ok(json!({ "epic": args.epic, "rows": [] }))
                .with_error(EnvelopeError::from(&error))
                .with_source(&session, path));
        }
        Err(error @ SessionError::NoTable) => return Err(CliError::Command(error.to_string())),
    };

    let rows = filtered.rows();
    let mut result = CommandResult::ok(json!({
        "epic": filtered.epic,
        "rows": rows,
        "chart": filtered.chart_series(),
    }))
    .with_table(TextTable::from_rows(&rows))
    .with_warnings(zero_volume_warning(rows.iter().map(|row| row.vwap)).into_iter().collect());

    if filtered.is_empty() {
        result = result.with_warning(format!(
            "every group for epic '{}' has zero net volume and was excluded",
            filtered.epic
        ));
    }

    Ok(result.with_source(&session, path))
}
