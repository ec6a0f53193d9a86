//! Write both VWAP tables next to a base output path.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::info;
use vwap_core::Tabular;

use crate::cli::ExportArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::export_writer::ExportFormat;

use super::{open_session, CommandResult};

const PER_STOCK_SUFFIX: &str = "_per_stock";
const PER_TRADE_TYPE_SUFFIX: &str = "_per_stock_trade_type_pair";

pub fn run(args: &ExportArgs, settings: &Settings) -> Result<CommandResult, CliError> {
    let format = export_format(&args.output)?;
    let session = open_session(&args.source.file, settings)?;

    let instruments = session.instrument_vwaps();
    let trade_types = session.trade_type_vwaps();

    let per_stock = sibling_path(&args.output, PER_STOCK_SUFFIX, format);
    let per_trade_type = sibling_path(&args.output, PER_TRADE_TYPE_SUFFIX, format);

    write_rows(&per_stock, format, &instruments)?;
    write_rows(&per_trade_type, format, &trade_types)?;

    Ok(CommandResult::ok(json!({
        "format": format.as_str(),
        "files": [
            { "path": per_stock.display().to_string(), "rows": instruments.len() },
            { "path": per_trade_type.display().to_string(), "rows": trade_types.len() },
        ],
    }))
    .with_source(&session, &args.source.file))
}

fn export_format(output: &Path) -> Result<ExportFormat, CliError> {
    output
        .extension()
        .and_then(|extension| extension.to_str())
        .and_then(ExportFormat::from_extension)
        .ok_or_else(|| {
            CliError::Command(format!(
                "invalid file extension for '{}': expected .csv or .xml",
                output.display()
            ))
        })
}

/// `dir/name.ext` becomes `dir/name<suffix>.<format>`.
fn sibling_path(output: &Path, suffix: &str, format: ExportFormat) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}{suffix}.{}", format.as_str()))
}

fn write_rows<T: Tabular>(path: &Path, format: ExportFormat, rows: &[T]) -> Result<(), CliError> {
    let file = File::create(path)?;
    format.write(BufWriter::new(file), rows)?;
    info!(path = %path.display(), rows = rows.len(), "exported");
    Ok(())
}
