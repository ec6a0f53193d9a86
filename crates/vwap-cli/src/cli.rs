//! CLI argument definitions for `vwap`.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `load` | Load a trade file and summarise it |
//! | `epics` | List distinct epics in first-seen order |
//! | `instruments` | VWAP per `(epic, isin)` |
//! | `trade-types` | VWAP per `(epic, isin, trade type)` |
//! | `filter` | Overall and per-trade-type VWAP for one epic |
//! | `export` | Write both VWAP tables as CSV or XML |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings and errors as failures |
//! | `--zero-volume` | `nan` | Zero-volume groups: `nan` or `exclude` |
//! | `--verbose` | `false` | Debug logging on stderr |
//!
//! The trade file argument falls back to `VWAP_TRADES_FILE`.
//!
//! # Examples
//!
//! ```bash
//! vwap instruments trades.csv --format table
//! vwap filter VOD trades.csv --pretty
//! VWAP_TRADES_FILE=trades.csv vwap export --output out/vwap.xml
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vwap_core::ZeroVolumePolicy;

/// Volume-weighted average prices from a trade file.
#[derive(Debug, Parser)]
#[command(
    name = "vwap",
    author,
    version,
    about = "Volume-weighted average prices from delimited trade files",
    long_about = "Loads a comma-separated trade file (epic, isin, trade type, reserved, \
quantity, price) and reports VWAP per instrument, per instrument and trade type, \
or for a single epic.\n\
\n\
Use 'vwap <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: Single JSON object (default)
    /// - ndjson: Metadata line followed by one JSON object per row
    /// - table: Aligned text table
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// How to report groups whose quantities net to zero.
    #[arg(long, global = true, value_enum, default_value_t = ZeroVolumeArg::Nan)]
    pub zero_volume: ZeroVolumeArg,

    /// Enable debug logging on stderr (overridden by VWAP_LOG / RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON.
    Ndjson,
}

/// Zero-volume group policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ZeroVolumeArg {
    /// Keep the group, VWAP is NaN (null in JSON).
    Nan,
    /// Leave the group out of the results.
    Exclude,
}

impl From<ZeroVolumeArg> for ZeroVolumePolicy {
    fn from(value: ZeroVolumeArg) -> Self {
        match value {
            ZeroVolumeArg::Nan => ZeroVolumePolicy::Nan,
            ZeroVolumeArg::Exclude => ZeroVolumePolicy::Exclude,
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a trade file and summarise it.
    ///
    /// # Examples
    ///
    ///   vwap load trades.csv
    ///   vwap load trades.csv --records --format table
    Load(LoadArgs),

    /// List distinct epics in the order they first appear.
    Epics(SourceArgs),

    /// VWAP per instrument (epic, isin).
    Instruments(SourceArgs),

    /// VWAP per instrument and trade type (epic, isin, trade type).
    TradeTypes(SourceArgs),

    /// Overall and per-trade-type VWAP for one epic.
    ///
    /// Unknown epics produce an `epic_not_found` error (exit code 3).
    ///
    /// # Examples
    ///
    ///   vwap filter VOD trades.csv
    Filter(FilterArgs),

    /// Export both VWAP tables as CSV or XML.
    ///
    /// Writes `<stem>_per_stock.<ext>` and `<stem>_per_stock_trade_type_pair.<ext>`
    /// next to the given output path. The extension selects the format.
    ///
    /// # Examples
    ///
    ///   vwap export trades.csv --output reports/vwap.csv
    Export(ExportArgs),
}

/// Trade file shared by every command.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Comma-separated trade file with a header row.
    #[arg(env = "VWAP_TRADES_FILE", value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the `load` command.
#[derive(Debug, Args)]
pub struct LoadArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Include every loaded record in the output.
    #[arg(long, default_value_t = false)]
    pub records: bool,
}

/// Arguments for the `filter` command.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Epic to report on (exact, case-sensitive).
    pub epic: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `export` command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Base output path; its extension (.csv or .xml) selects the format.
    #[arg(long, short)]
    pub output: PathBuf,
}
