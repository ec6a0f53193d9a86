use std::fmt::{Display, Formatter};

use vwap_core::{Cell, Tabular};

/// Column-aligned plain text rendering of [`Tabular`] rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn from_rows<T: Tabular>(rows: &[T]) -> Self {
        Self {
            headers: T::COLUMNS.iter().map(|name| (*name).to_owned()).collect(),
            rows: rows
                .iter()
                .map(|row| row.cells().into_iter().map(render_cell).collect())
                .collect(),
        }
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|value| value.chars().count())
                    .fold(header.chars().count(), usize::max)
            })
            .collect()
    }
}

impl Display for TextTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let widths = self.widths();
        write_line(f, &self.headers, &widths)?;

        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        write_line(f, &rule, &widths)?;

        for row in &self.rows {
            write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut Formatter<'_>, values: &[String], widths: &[usize]) -> std::fmt::Result {
    let line = values
        .iter()
        .zip(widths)
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}

fn render_cell(cell: Cell<'_>) -> String {
    match cell {
        Cell::Text(text) => text.to_owned(),
        Cell::Integer(value) => value.to_string(),
        Cell::Float(value) if value.is_nan() => String::from("NaN"),
        Cell::Float(value) => format!("{value:.4}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vwap_core::InstrumentVwap;

    #[test]
    fn aligns_columns_to_widest_value() {
        let table = TextTable::from_rows(&[InstrumentVwap {
            epic: String::from("VOD"),
            isin: String::from("GB00BH4HKS39"),
            notional: 80.0,
            volume: 30,
            vwap: 80.0 / 30.0,
        }]);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "epic  isin          VWAP");
        assert_eq!(lines[1], "----  ------------  ------");
        assert_eq!(lines[2], "VOD   GB00BH4HKS39  2.6667");
    }
}
