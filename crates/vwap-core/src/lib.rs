//! # VWAP Core
//!
//! Trade record table and Volume-Weighted Average Price aggregation.
//!
//! ## Overview
//!
//! - **Record table**: a delimited trade file loaded into typed, ordered rows
//! - **Aggregation engine**: pure VWAP queries per instrument, per instrument
//!   and trade type, and for a single epic
//! - **Session**: explicit holder of the current table for a front end
//! - **Tabular schema**: typed columns for export formatters
//! - **Envelope**: response wrapper for machine-readable output
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`aggregation`] | Q1/Q2/Q3 VWAP queries and options |
//! | [`domain`] | Trade and result row types |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Load, query and validation errors |
//! | [`session`] | Current table and epic selection |
//! | [`table`] | Loader and [`RecordTable`] |
//! | [`tabular`] | Static column schemas for export |
//!
//! ## Quick Start
//!
//! ```rust
//! use vwap_core::{filtered_vwap, overall_vwap_per_instrument, RecordTable};
//!
//! let source = "epic,isin,trade type,reserved,quantity,price\n\
//!               VOD,GB00BH4HKS39,buy,LSE,10,2.0\n\
//!               VOD,GB00BH4HKS39,sell,LSE,20,3.0\n";
//! let table = RecordTable::from_reader(source.as_bytes())?;
//!
//! let per_instrument = overall_vwap_per_instrument(&table);
//! assert_eq!(per_instrument.len(), 1);
//!
//! let filtered = filtered_vwap(&table, "VOD")?;
//! assert_eq!(filtered.rows()[0].trade_type, "Overall");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Loading returns [`LoadError`] and never yields a partial table. The
//! single-epic query returns [`AggregationError::EpicNotFound`] for an
//! unknown epic. Every other query is total.
//!
//! Groups whose quantities net to zero report `vwap = NaN` by default;
//! [`ZeroVolumePolicy::Exclude`] drops them instead.

pub mod aggregation;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod session;
pub mod table;
pub mod tabular;

pub use aggregation::{
    filtered_vwap, filtered_vwap_with, overall_vwap_per_instrument,
    overall_vwap_per_instrument_with, vwap_per_instrument_and_trade_type,
    vwap_per_instrument_and_trade_type_with, AggregationOptions, ChartSeries, FilteredVwap,
    ZeroVolumePolicy, OVERALL_TRADE_TYPE,
};
pub use domain::{InstrumentVwap, TradeRecord, TradeTypeVwap, UtcDateTime, VwapTotals};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{AggregationError, LoadError, SessionError, ValidationError};
pub use session::Session;
pub use table::{RecordTable, DEFAULT_HEADERS, FIELD_COUNT};
pub use tabular::{Cell, Tabular};
