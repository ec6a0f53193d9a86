pub mod export_writer;
pub mod text_table;

use std::io::{self, Write};

use serde_json::Value;
use vwap_core::Envelope;

use self::text_table::TextTable;
use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    table: Option<&TextTable>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Ndjson => render_ndjson(&mut out, envelope)?,
        OutputFormat::Table => render_table(&mut out, envelope, table)?,
    }

    Ok(())
}

/// Metadata first, then one line per row (or the whole payload when it has no
/// `rows` array), then one line per error.
fn render_ndjson<W: Write>(out: &mut W, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "{}", serde_json::to_string(&envelope.meta)?)?;

    match envelope.data.get("rows").and_then(Value::as_array) {
        Some(rows) => {
            for row in rows {
                writeln!(out, "{}", serde_json::to_string(row)?)?;
            }
        }
        None => writeln!(out, "{}", serde_json::to_string(&envelope.data)?)?,
    }

    for error in &envelope.errors {
        writeln!(out, "{}", serde_json::to_string(error)?)?;
    }

    Ok(())
}

fn render_table<W: Write>(
    out: &mut W,
    envelope: &Envelope<Value>,
    table: Option<&TextTable>,
) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    if let Some(source) = &envelope.meta.source {
        writeln!(out, "source      : {source}")?;
    }
    writeln!(out, "records     : {}", envelope.meta.record_count)?;
    writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    match table {
        Some(table) => {
            writeln!(out)?;
            write!(out, "{table}")?;
        }
        None => {
            writeln!(out, "data:")?;
            let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
            for line in pretty_data.lines() {
                writeln!(out, "  {line}")?;
            }
        }
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use vwap_core::{EnvelopeError, EnvelopeMeta};

    fn envelope(data: Value, errors: Vec<EnvelopeError>) -> Envelope<Value> {
        let meta = EnvelopeMeta::new("request-12345", "v1.0.0", 2, 0).expect("valid meta");
        Envelope::with_errors(meta, data, errors).expect("valid envelope")
    }

    #[test]
    fn ndjson_emits_meta_then_one_line_per_row() {
        let mut sink = Vec::new();
        let envelope = envelope(json!({ "rows": [{ "epic": "A" }, { "epic": "B" }] }), vec![]);

        render_ndjson(&mut sink, &envelope).expect("render");

        let text = String::from_utf8(sink).expect("utf8");
        let lines: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["request_id"], "request-12345");
        assert_eq!(lines[2]["epic"], "B");
    }

    #[test]
    fn table_output_lists_errors() {
        let mut sink = Vec::new();
        let error = EnvelopeError::new("epic_not_found", "epic 'Z' missing").expect("valid");
        let envelope = envelope(json!({ "rows": [] }), vec![error]);

        render_table(&mut sink, &envelope, None).expect("render");

        let text = String::from_utf8(sink).expect("utf8");
        assert!(text.contains("  - epic_not_found: epic 'Z' missing"));
    }
}
