//! Behavior-driven tests for the column schemas handed to exporters.
//!
//! These tests verify that every result row exposes the columns a user sees
//! in exported files, in order, with cells of the right kind.

use vwap_core::{
    filtered_vwap, overall_vwap_per_instrument, vwap_per_instrument_and_trade_type, Cell,
    InstrumentVwap, RecordTable, Tabular, TradeRecord, TradeTypeVwap,
};

fn table() -> RecordTable {
    RecordTable::from_records(vec![
        TradeRecord::new("VOD", "GB00BH4HKS39", "buy", "LSE", 10, 2.0),
        TradeRecord::new("VOD", "GB00BH4HKS39", "sell", "LSE", 20, 3.0),
    ])
}

#[test]
fn when_per_instrument_rows_are_exported_they_carry_epic_isin_and_vwap() {
    // Given: Per-instrument results
    let rows = overall_vwap_per_instrument(&table());

    // When: An exporter asks for cells
    let cells = rows[0].cells();

    // Then: Two text cells and one decimal cell match the header
    assert_eq!(InstrumentVwap::COLUMNS, ["epic", "isin", "VWAP"]);
    assert_eq!(cells[0], Cell::Text("VOD"));
    assert_eq!(cells[1], Cell::Text("GB00BH4HKS39"));
    assert!(matches!(cells[2], Cell::Float(vwap) if (vwap - 80.0 / 30.0).abs() < 1e-12));
}

#[test]
fn when_trade_type_rows_are_exported_the_trade_type_sits_before_vwap() {
    let rows = vwap_per_instrument_and_trade_type(&table());

    assert_eq!(TradeTypeVwap::COLUMNS, ["epic", "isin", "trade type", "VWAP"]);
    assert_eq!(rows[1].cells()[2], Cell::Text("sell"));
    assert_eq!(rows[1].cells()[3], Cell::Float(3.0));
}

#[test]
fn when_a_filtered_view_is_exported_overall_rows_use_the_trade_type_schema() {
    let filtered = filtered_vwap(&table(), "VOD").expect("VOD exists");

    let rows = filtered.rows();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].cells()[2], Cell::Text("Overall"));
    assert!(rows
        .iter()
        .all(|row| row.cells().len() == TradeTypeVwap::COLUMNS.len()));
}

#[test]
fn when_raw_trades_are_exported_quantity_is_an_integer_cell() {
    let table = table();
    let record = &table.records()[0];

    assert_eq!(TradeRecord::COLUMNS.len(), 6);
    assert_eq!(record.cells()[3], Cell::Text("LSE"));
    assert_eq!(record.cells()[4], Cell::Integer(10));
    assert_eq!(record.cells()[5], Cell::Float(2.0));
}
