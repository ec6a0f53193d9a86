//! VWAP queries over a loaded [`RecordTable`].
//!
//! All queries are pure: they borrow the table, build fresh result rows and
//! never mutate their input. Rows are emitted in first-seen group order, so
//! the same table always yields the same sequence.
//!
//! | Query | Grouping key | Result |
//! |-------|--------------|--------|
//! | [`overall_vwap_per_instrument`] | `(epic, isin)` | [`InstrumentVwap`] rows |
//! | [`vwap_per_instrument_and_trade_type`] | `(epic, isin, trade type)` | [`TradeTypeVwap`] rows |
//! | [`filtered_vwap`] | one epic, both keys | [`FilteredVwap`] |

use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AggregationError, InstrumentVwap, RecordTable, TradeRecord, TradeTypeVwap, VwapTotals};

/// Trade-type label carried by the summary rows of [`FilteredVwap::rows`].
pub const OVERALL_TRADE_TYPE: &str = "Overall";

/// What to do with groups whose quantities net to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroVolumePolicy {
    /// Keep the group and report `vwap` as NaN.
    #[default]
    Nan,
    /// Drop the group from the result.
    Exclude,
}

/// Knobs shared by every query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationOptions {
    pub zero_volume: ZeroVolumePolicy,
}

impl AggregationOptions {
    pub const fn with_zero_volume(mut self, zero_volume: ZeroVolumePolicy) -> Self {
        self.zero_volume = zero_volume;
        self
    }

    fn keeps(self, totals: &VwapTotals) -> bool {
        totals.has_volume() || self.zero_volume == ZeroVolumePolicy::Nan
    }
}

/// Q3 result: one epic's overall rows plus its per-trade-type breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredVwap {
    pub epic: String,
    pub overall: Vec<InstrumentVwap>,
    pub breakdown: Vec<TradeTypeVwap>,
}

impl FilteredVwap {
    /// Flat view: every overall row labelled [`OVERALL_TRADE_TYPE`], then the
    /// breakdown rows.
    pub fn rows(&self) -> Vec<TradeTypeVwap> {
        self.overall
            .iter()
            .map(|row| row.with_trade_type(OVERALL_TRADE_TYPE))
            .chain(self.breakdown.iter().cloned())
            .collect()
    }

    /// Column-chart series over [`FilteredVwap::rows`].
    pub fn chart_series(&self) -> ChartSeries {
        let rows = self.rows();
        ChartSeries {
            name: self.epic.clone(),
            labels: rows.iter().map(|row| row.trade_type.clone()).collect(),
            values: rows.iter().map(|row| row.vwap).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.overall.len() + self.breakdown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overall.is_empty() && self.breakdown.is_empty()
    }
}

/// Labels and values for a single-series column chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Q1 with default options.
pub fn overall_vwap_per_instrument(table: &RecordTable) -> Vec<InstrumentVwap> {
    overall_vwap_per_instrument_with(table, AggregationOptions::default())
}

/// VWAP per `(epic, isin)` across every trade in the table.
pub fn overall_vwap_per_instrument_with(
    table: &RecordTable,
    options: AggregationOptions,
) -> Vec<InstrumentVwap> {
    let rows = instrument_rows(table.iter(), options);
    debug!(records = table.len(), groups = rows.len(), "aggregated per instrument");
    rows
}

/// Q2 with default options.
pub fn vwap_per_instrument_and_trade_type(table: &RecordTable) -> Vec<TradeTypeVwap> {
    vwap_per_instrument_and_trade_type_with(table, AggregationOptions::default())
}

/// VWAP per `(epic, isin, trade type)` across every trade in the table.
pub fn vwap_per_instrument_and_trade_type_with(
    table: &RecordTable,
    options: AggregationOptions,
) -> Vec<TradeTypeVwap> {
    let rows = trade_type_rows(table.iter(), options);
    debug!(
        records = table.len(),
        groups = rows.len(),
        "aggregated per instrument and trade type"
    );
    rows
}

/// Q3 with default options.
///
/// # Errors
/// [`AggregationError::EpicNotFound`] when no trade carries `epic`.
pub fn filtered_vwap(table: &RecordTable, epic: &str) -> Result<FilteredVwap, AggregationError> {
    filtered_vwap_with(table, epic, AggregationOptions::default())
}

/// Overall and per-trade-type VWAP for the trades of a single epic.
///
/// The match is exact and case-sensitive.
///
/// # Errors
/// [`AggregationError::EpicNotFound`] when no trade carries `epic`.
pub fn filtered_vwap_with(
    table: &RecordTable,
    epic: &str,
    options: AggregationOptions,
) -> Result<FilteredVwap, AggregationError> {
    if !table.contains_epic(epic) {
        return Err(AggregationError::EpicNotFound {
            epic: epic.to_owned(),
        });
    }

    let matching = || table.iter().filter(move |record| record.epic == epic);
    let filtered = FilteredVwap {
        epic: epic.to_owned(),
        overall: instrument_rows(matching(), options),
        breakdown: trade_type_rows(matching(), options),
    };

    debug!(
        epic,
        overall = filtered.overall.len(),
        breakdown = filtered.breakdown.len(),
        "aggregated single epic"
    );
    Ok(filtered)
}

fn instrument_rows<'a>(
    records: impl Iterator<Item = &'a TradeRecord>,
    options: AggregationOptions,
) -> Vec<InstrumentVwap> {
    group_totals(records, |record| (record.epic.as_str(), record.isin.as_str()))
        .into_iter()
        .filter(|(_, totals)| options.keeps(totals))
        .map(|((epic, isin), totals)| InstrumentVwap::from_totals(epic, isin, totals))
        .collect()
}

fn trade_type_rows<'a>(
    records: impl Iterator<Item = &'a TradeRecord>,
    options: AggregationOptions,
) -> Vec<TradeTypeVwap> {
    group_totals(records, |record| {
        (
            record.epic.as_str(),
            record.isin.as_str(),
            record.trade_type.as_str(),
        )
    })
    .into_iter()
    .filter(|(_, totals)| options.keeps(totals))
    .map(|((epic, isin, trade_type), totals)| {
        TradeTypeVwap::from_totals(epic, isin, trade_type, totals)
    })
    .collect()
}

/// Sum every record into its group, keeping groups in first-seen order.
fn group_totals<'a, K, F>(
    records: impl Iterator<Item = &'a TradeRecord>,
    key_of: F,
) -> IndexMap<K, VwapTotals>
where
    K: Hash + Eq,
    F: Fn(&'a TradeRecord) -> K,
{
    let mut groups: IndexMap<K, VwapTotals> = IndexMap::new();
    for record in records {
        groups.entry(key_of(record)).or_default().add(record);
    }
    groups
}
