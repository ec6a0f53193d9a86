//! Static column schemas for handing rows to export formatters.
//!
//! Each row type declares its column names once and yields one typed
//! [`Cell`] per column, so a formatter decides quoting from the cell kind
//! instead of inspecting values at runtime.

use crate::{InstrumentVwap, TradeRecord, TradeTypeVwap};

/// One value of an exported row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
}

/// A row shape with a fixed, named column layout.
pub trait Tabular {
    const COLUMNS: &'static [&'static str];

    /// Cells in [`Tabular::COLUMNS`] order.
    fn cells(&self) -> Vec<Cell<'_>>;
}

impl Tabular for InstrumentVwap {
    const COLUMNS: &'static [&'static str] = &["epic", "isin", "VWAP"];

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(&self.epic),
            Cell::Text(&self.isin),
            Cell::Float(self.vwap),
        ]
    }
}

impl Tabular for TradeTypeVwap {
    const COLUMNS: &'static [&'static str] = &["epic", "isin", "trade type", "VWAP"];

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(&self.epic),
            Cell::Text(&self.isin),
            Cell::Text(&self.trade_type),
            Cell::Float(self.vwap),
        ]
    }
}

impl Tabular for TradeRecord {
    const COLUMNS: &'static [&'static str] =
        &["epic", "isin", "trade type", "reserved", "quantity", "price"];

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(&self.epic),
            Cell::Text(&self.isin),
            Cell::Text(&self.trade_type),
            Cell::Text(&self.reserved),
            Cell::Integer(self.quantity),
            Cell::Float(self.price),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_width<T: Tabular>(row: &T) {
        assert_eq!(row.cells().len(), T::COLUMNS.len());
    }

    #[test]
    fn every_schema_has_one_cell_per_column() {
        let record = TradeRecord::new("A", "I1", "buy", "x", 3, 1.5);
        assert_width(&record);
        assert_width(&InstrumentVwap {
            epic: "A".into(),
            isin: "I1".into(),
            notional: 4.5,
            volume: 3,
            vwap: 1.5,
        });
        assert_width(&InstrumentVwap {
            epic: "A".into(),
            isin: "I1".into(),
            notional: 4.5,
            volume: 3,
            vwap: 1.5,
        }
        .with_trade_type("buy"));
    }

    #[test]
    fn quantity_is_an_integer_cell() {
        let record = TradeRecord::new("A", "I1", "buy", "x", 3, 1.5);
        assert_eq!(record.cells()[4], Cell::Integer(3));
    }
}
