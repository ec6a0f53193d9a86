//! Front-end state: the current table and the current epic selection.
//!
//! A [`Session`] only swaps in a new table once it has loaded completely, so a
//! failed reload leaves the previous table (and any snapshot handed out from
//! it) untouched.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::aggregation::{
    filtered_vwap_with, overall_vwap_per_instrument_with,
    vwap_per_instrument_and_trade_type_with, AggregationOptions, FilteredVwap,
};
use crate::{InstrumentVwap, LoadError, RecordTable, SessionError, TradeTypeVwap};

#[derive(Debug, Default)]
pub struct Session {
    options: AggregationOptions,
    table: Option<Arc<RecordTable>>,
    selected_epic: Option<String>,
}

impl Session {
    pub fn new(options: AggregationOptions) -> Self {
        Self {
            options,
            table: None,
            selected_epic: None,
        }
    }

    pub fn options(&self) -> AggregationOptions {
        self.options
    }

    /// Load `path` and make it the current table.
    ///
    /// # Errors
    /// Returns the [`LoadError`]; the previous table stays current.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<&RecordTable, LoadError> {
        let path = path.as_ref();
        let loaded = RecordTable::load(path);
        self.replace(loaded, &path.display().to_string())
    }

    /// Same as [`Session::reload`] for in-memory sources.
    ///
    /// # Errors
    /// Returns the [`LoadError`]; the previous table stays current.
    pub fn reload_from_reader<R: Read>(&mut self, reader: R) -> Result<&RecordTable, LoadError> {
        let loaded = RecordTable::from_reader(reader);
        self.replace(loaded, "<reader>")
    }

    pub fn table(&self) -> Option<&RecordTable> {
        self.table.as_deref()
    }

    /// Shared handle on the current table, unaffected by later reloads.
    pub fn snapshot(&self) -> Option<Arc<RecordTable>> {
        self.table.clone()
    }

    pub fn instrument_vwaps(&self) -> Vec<InstrumentVwap> {
        self.table()
            .map(|table| overall_vwap_per_instrument_with(table, self.options))
            .unwrap_or_default()
    }

    pub fn trade_type_vwaps(&self) -> Vec<TradeTypeVwap> {
        self.table()
            .map(|table| vwap_per_instrument_and_trade_type_with(table, self.options))
            .unwrap_or_default()
    }

    /// Run the single-epic query and remember `epic` as the selection.
    ///
    /// # Errors
    /// [`SessionError::NoTable`] before any successful load, or the wrapped
    /// `EpicNotFound`; the previous selection is kept in both cases.
    pub fn select_epic(&mut self, epic: &str) -> Result<FilteredVwap, SessionError> {
        let table = self.table().ok_or(SessionError::NoTable)?;
        let filtered = filtered_vwap_with(table, epic, self.options)?;
        self.selected_epic = Some(epic.to_owned());
        Ok(filtered)
    }

    pub fn selected_epic(&self) -> Option<&str> {
        self.selected_epic.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected_epic = None;
    }

    fn replace(
        &mut self,
        loaded: Result<RecordTable, LoadError>,
        source: &str,
    ) -> Result<&RecordTable, LoadError> {
        match loaded {
            Ok(table) => Ok(self.install(table)),
            Err(error) => {
                warn!(source, %error, "reload failed, keeping previous table");
                Err(error)
            }
        }
    }

    fn install(&mut self, table: RecordTable) -> &RecordTable {
        let selection_survives = self
            .selected_epic
            .as_deref()
            .is_some_and(|epic| table.contains_epic(epic));
        if !selection_survives {
            self.selected_epic = None;
        }

        info!(records = table.len(), "session table replaced");
        &**self.table.insert(Arc::new(table))
    }
}
