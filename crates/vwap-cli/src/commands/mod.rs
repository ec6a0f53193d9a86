mod epics;
mod export;
mod filter;
mod instruments;
mod load;
mod trade_types;

use std::path::Path;
use std::time::Instant;

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;
use vwap_core::{Envelope, EnvelopeError, EnvelopeMeta, Session};

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::error::CliError;
use crate::output::text_table::TextTable;

pub const SCHEMA_VERSION: &str = "v1.0.0";

pub struct CommandResult {
    pub data: Value,
    pub table: Option<TextTable>,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub record_count: usize,
    pub source: Option<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            table: None,
            warnings: Vec::new(),
            errors: Vec::new(),
            record_count: 0,
            source: None,
        }
    }

    pub fn with_table(mut self, table: TextTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_error(mut self, error: EnvelopeError) -> Self {
        self.errors.push(error);
        self
    }

    pub fn with_source(mut self, session: &Session, path: &Path) -> Self {
        self.record_count = session.table().map_or(0, |table| table.len());
        self.source = Some(path.display().to_string());
        self
    }
}

/// Envelope plus the optional text rendering of its rows.
pub struct Rendered {
    pub envelope: Envelope<Value>,
    pub table: Option<TextTable>,
}

pub fn run(cli: &Cli, settings: &Settings) -> Result<Rendered, CliError> {
    let started = Instant::now();

    let command_result = match &cli.command {
        Command::Load(args) => load::run(args, settings)?,
        Command::Epics(args) => epics::run(args, settings)?,
        Command::Instruments(args) => instruments::run(args, settings)?,
        Command::TradeTypes(args) => trade_types::run(args, settings)?,
        Command::Filter(args) => filter::run(args, settings)?,
        Command::Export(args) => export::run(args, settings)?,
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let CommandResult {
        data,
        table,
        warnings,
        errors,
        record_count,
        source,
    } = command_result;

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        SCHEMA_VERSION,
        record_count,
        latency_ms,
    )?;
    if let Some(source) = source {
        meta = meta.with_source(source);
    }
    for warning in warnings {
        meta.push_warning(warning);
    }

    debug!(
        request_id = %meta.request_id,
        latency_ms,
        errors = errors.len(),
        "command finished"
    );

    let envelope = Envelope::with_errors(meta, data, errors)?;
    Ok(Rendered { envelope, table })
}

/// Fresh session holding the table at `path`.
fn open_session(path: &Path, settings: &Settings) -> Result<Session, CliError> {
    let mut session = Session::new(settings.aggregation);
    session.reload(path)?;
    Ok(session)
}

/// Warning for rows whose VWAP is undefined because their volume nets to zero.
fn zero_volume_warning(vwaps: impl IntoIterator<Item = f64>) -> Option<String> {
    let undefined = vwaps.into_iter().filter(|vwap| vwap.is_nan()).count();
    (undefined > 0).then(|| {
        format!("{undefined} group(s) have zero net volume; their vwap is reported as null")
    })
}
