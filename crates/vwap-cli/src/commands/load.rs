use serde::Serialize;
use serde_json::Value;
use vwap_core::TradeRecord;

use crate::cli::LoadArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::text_table::TextTable;

use super::{open_session, CommandResult};

#[derive(Debug, Serialize)]
struct LoadSummary<'a> {
    headers: &'a [String],
    record_count: usize,
    epics: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<&'a [TradeRecord]>,
}

pub fn run(args: &LoadArgs, settings: &Settings) -> Result<CommandResult, CliError> {
    let path = &args.source.file;
    let session = open_session(path, settings)?;
    let Some(table) = session.table() else {
        return Err(CliError::Command(String::from("no table loaded")));
    };

    let summary = LoadSummary {
        headers: table.headers(),
        record_count: table.len(),
        epics: table.epics(),
        rows: args.records.then(|| table.records()),
    };
    let data: Value = serde_json::to_value(&summary)?;

    let mut result = CommandResult::ok(data).with_source(&session, path);
    if args.records {
        result = result.with_table(TextTable::from_rows(table.records()));
    }
    if table.is_empty() {
        result = result.with_warning(format!("{} contains no trades", path.display()));
    }

    Ok(result)
}
