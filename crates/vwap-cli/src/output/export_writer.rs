//! CSV and XML serialization of [`Tabular`] rows.
//!
//! CSV: a quoted header line, then one line per row with text cells quoted
//! (embedded quotes doubled) and numeric cells bare.
//!
//! XML: one `<asset>` element per row with a tab-indented child per column.
//! Column names become tag names with whitespace replaced by `_`.

use std::io::Write;

use vwap_core::{Cell, Tabular};

/// File format selected from the export path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xml,
}

impl ExportFormat {
    /// Case-insensitive match on `csv` / `xml`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if extension.eq_ignore_ascii_case("xml") {
            Some(Self::Xml)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xml => "xml",
        }
    }

    pub fn write<T: Tabular, W: Write>(self, writer: W, rows: &[T]) -> std::io::Result<()> {
        match self {
            Self::Csv => write_csv(writer, rows),
            Self::Xml => write_xml(writer, rows),
        }
    }
}

pub fn write_csv<T: Tabular, W: Write>(mut writer: W, rows: &[T]) -> std::io::Result<()> {
    let header = T::COLUMNS
        .iter()
        .map(|name| quote_csv(name))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{header}")?;

    for row in rows {
        let line = row
            .cells()
            .into_iter()
            .map(|cell| match cell {
                Cell::Text(text) => quote_csv(text),
                Cell::Integer(value) => value.to_string(),
                Cell::Float(value) => value.to_string(),
            })
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{line}")?;
    }

    writer.flush()
}

pub fn write_xml<T: Tabular, W: Write>(mut writer: W, rows: &[T]) -> std::io::Result<()> {
    let tags: Vec<String> = T::COLUMNS.iter().map(|name| xml_tag(name)).collect();

    for row in rows {
        writeln!(writer, "<asset>")?;
        for (tag, cell) in tags.iter().zip(row.cells()) {
            let text = match cell {
                Cell::Text(text) => escape_xml(text),
                Cell::Integer(value) => value.to_string(),
                Cell::Float(value) => value.to_string(),
            };
            writeln!(writer, "\t<{tag}>{text}</{tag}>")?;
        }
        writeln!(writer, "</asset>")?;
    }

    writer.flush()
}

fn quote_csv(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn xml_tag(column: &str) -> String {
    column
        .chars()
        .map(|ch| if ch.is_whitespace() { '_' } else { ch })
        .collect()
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use vwap_core::{InstrumentVwap, TradeTypeVwap};

    fn instrument(epic: &str, vwap: f64) -> InstrumentVwap {
        InstrumentVwap {
            epic: epic.to_owned(),
            isin: String::from("GB00BH4HKS39"),
            notional: vwap * 10.0,
            volume: 10,
            vwap,
        }
    }

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
    {
        let mut sink = Vec::new();
        write(&mut sink).expect("write to memory");
        String::from_utf8(sink).expect("utf8")
    }

    #[test]
    fn csv_quotes_text_and_leaves_numbers_bare() {
        let output = render(|sink| write_csv(sink, &[instrument("VOD", 1.5)]));

        assert_eq!(
            output,
            "\"epic\",\"isin\",\"VWAP\"\n\"VOD\",\"GB00BH4HKS39\",1.5\n"
        );
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        let output = render(|sink| write_csv(sink, &[instrument("A\"B", 2.0)]));
        assert!(output.contains("\"A\"\"B\""));
    }

    #[test]
    fn csv_writes_nan_for_zero_volume_groups() {
        let output = render(|sink| write_csv(sink, &[instrument("VOD", f64::NAN)]));
        assert!(output.ends_with(",NaN\n"));
    }

    #[test]
    fn xml_uses_well_formed_tags_per_column() {
        let row = instrument("VOD", 1.5).with_trade_type("buy & hold");
        let output = render(|sink| write_xml(sink, &[row]));

        assert_eq!(
            output,
            "<asset>\n\
             \t<epic>VOD</epic>\n\
             \t<isin>GB00BH4HKS39</isin>\n\
             \t<trade_type>buy &amp; hold</trade_type>\n\
             \t<VWAP>1.5</VWAP>\n\
             </asset>\n"
        );
    }

    #[test]
    fn empty_rows_still_produce_a_csv_header() {
        let rows: Vec<TradeTypeVwap> = Vec::new();
        let output = render(|sink| write_csv(sink, &rows));
        assert_eq!(output, "\"epic\",\"isin\",\"trade type\",\"VWAP\"\n");
    }

    #[test]
    fn extension_match_ignores_case() {
        assert_eq!(ExportFormat::from_extension("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_extension("Xml"), Some(ExportFormat::Xml));
        assert_eq!(ExportFormat::from_extension("txt"), None);
    }
}
