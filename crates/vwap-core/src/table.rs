//! Loading of delimited trade files into a typed, ordered table.
//!
//! The first line is a header row. Every following non-blank line must hold
//! exactly six comma-separated fields, mapped by position:
//!
//! | Column | Field | Type |
//! |--------|-------|------|
//! | 0 | `epic` | text |
//! | 1 | `isin` | text |
//! | 2 | `trade_type` | text |
//! | 3 | `reserved` | text |
//! | 4 | `quantity` | integer |
//! | 5 | `price` | decimal |
//!
//! Header names are kept for display but never checked against this layout.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info};

use crate::{LoadError, TradeRecord};

/// Number of fields in every header and data row.
pub const FIELD_COUNT: usize = 6;

/// Column titles used when a table is built in memory rather than loaded.
pub const DEFAULT_HEADERS: [&str; FIELD_COUNT] =
    ["epic", "isin", "trade type", "reserved", "quantity", "price"];

const QUANTITY_COLUMN: usize = 4;
const PRICE_COLUMN: usize = 5;

/// Trades of one load, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordTable {
    headers: Vec<String>,
    records: Vec<TradeRecord>,
}

impl RecordTable {
    /// Load a trade file from disk.
    ///
    /// # Errors
    /// Returns a [`LoadError`] if the file cannot be opened or any line is
    /// malformed. Nothing is returned for the lines that did parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading trade file");

        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;

        info!(
            path = %path.display(),
            records = table.len(),
            "trade file loaded"
        );
        Ok(table)
    }

    /// Parse trade data from any reader, header row first.
    ///
    /// # Errors
    /// Same failure modes as [`RecordTable::load`], minus opening the file.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut rows = reader.records();

        let header = match rows.next() {
            Some(row) => row.map_err(csv_error)?,
            None => return Err(LoadError::MissingHeader),
        };
        if header.len() < FIELD_COUNT {
            return Err(LoadError::HeaderTooShort {
                found: header.len(),
                expected: FIELD_COUNT,
            });
        }
        let headers = header.iter().map(str::to_owned).collect();

        let mut records = Vec::new();
        for row in rows {
            let row = row.map_err(csv_error)?;
            if is_blank(&row) {
                continue;
            }
            records.push(parse_record(&row)?);
        }

        Ok(Self { headers, records })
    }

    /// Build a table from records already in memory.
    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        Self {
            headers: DEFAULT_HEADERS.iter().map(|name| (*name).to_owned()).collect(),
            records,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TradeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct epics in the order they first appear.
    pub fn epics(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.epic.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Exact, case-sensitive epic lookup.
    pub fn contains_epic(&self, epic: &str) -> bool {
        self.records.iter().any(|record| record.epic == epic)
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a TradeRecord;
    type IntoIter = std::slice::Iter<'a, TradeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn parse_record(row: &StringRecord) -> Result<TradeRecord, LoadError> {
    let line = row_line(row);
    if row.len() != FIELD_COUNT {
        return Err(LoadError::FieldCount {
            line,
            found: row.len(),
            expected: FIELD_COUNT,
        });
    }

    let quantity_text = &row[QUANTITY_COLUMN];
    let quantity = quantity_text
        .parse::<i64>()
        .map_err(|_| LoadError::InvalidQuantity {
            line,
            value: quantity_text.to_owned(),
        })?;

    let price_text = &row[PRICE_COLUMN];
    let price = price_text
        .parse::<f64>()
        .map_err(|_| LoadError::InvalidPrice {
            line,
            value: price_text.to_owned(),
        })?;

    Ok(TradeRecord::new(
        &row[0], &row[1], &row[2], &row[3], quantity, price,
    ))
}

/// A whitespace-only line trims to a single empty field. Rows of empty
/// fields separated by commas are data and must parse.
fn is_blank(row: &StringRecord) -> bool {
    row.len() == 1 && row[0].is_empty()
}

fn row_line(row: &StringRecord) -> u64 {
    row.position().map_or(0, csv::Position::line)
}

fn csv_error(source: csv::Error) -> LoadError {
    let line = source.position().map_or(0, csv::Position::line);
    LoadError::Csv { line, source }
}
