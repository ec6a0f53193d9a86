use std::path::PathBuf;

use thiserror::Error;

/// Contract errors raised while building response envelopes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Reasons a trade source could not be turned into a [`crate::RecordTable`].
///
/// Any of these aborts the whole load; no partial table is ever produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open trade file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited data near line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("trade source is empty: expected a header row")]
    MissingHeader,

    #[error("header row has {found} columns, expected at least {expected}")]
    HeaderTooShort { found: usize, expected: usize },

    #[error("line {line} has {found} fields, expected {expected}")]
    FieldCount {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("line {line}: quantity '{value}' is not an integer")]
    InvalidQuantity { line: u64, value: String },

    #[error("line {line}: price '{value}' is not a number")]
    InvalidPrice { line: u64, value: String },
}

impl LoadError {
    /// Short machine-readable code used in envelopes.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "source_unreadable",
            Self::Csv { .. } => "malformed_source",
            Self::MissingHeader | Self::HeaderTooShort { .. } => "invalid_header",
            Self::FieldCount { .. } => "invalid_field_count",
            Self::InvalidQuantity { .. } => "invalid_quantity",
            Self::InvalidPrice { .. } => "invalid_price",
        }
    }
}

/// Query-level failures of the aggregation engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregationError {
    #[error("epic '{epic}' does not appear in the loaded trades")]
    EpicNotFound { epic: String },
}

impl AggregationError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EpicNotFound { .. } => "epic_not_found",
        }
    }
}

/// Errors surfaced by [`crate::Session`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no trade table has been loaded")]
    NoTable,

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}
