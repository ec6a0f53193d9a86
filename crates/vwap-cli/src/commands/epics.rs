use serde_json::json;

use crate::cli::SourceArgs;
use crate::config::Settings;
use crate::error::CliError;

use super::{open_session, CommandResult};

pub fn run(args: &SourceArgs, settings: &Settings) -> Result<CommandResult, CliError> {
    let session = open_session(&args.file, settings)?;
    let epics = session.table().map(|table| table.epics()).unwrap_or_default();

    Ok(CommandResult::ok(json!({ "rows": epics })).with_source(&session, &args.file))
}
