//! # Domain Models
//!
//! Typed rows for the trade VWAP engine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TradeRecord`] | One trade line of the source file |
//! | [`VwapTotals`] | Notional and volume sums of one group |
//! | [`InstrumentVwap`] | Result row keyed by `(epic, isin)` |
//! | [`TradeTypeVwap`] | Result row keyed by `(epic, isin, trade type)` |
//! | [`UtcDateTime`] | UTC timestamp used in envelopes |
//!
//! Every result row carries `notional`, `volume` and `vwap`. A group whose
//! volume nets to zero has `vwap == NaN`, which serializes as JSON `null`.

mod timestamp;
mod trade;
mod vwap;

pub use timestamp::UtcDateTime;
pub use trade::TradeRecord;
pub use vwap::{InstrumentVwap, TradeTypeVwap, VwapTotals};
