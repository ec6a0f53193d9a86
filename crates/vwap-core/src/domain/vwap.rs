use serde::{Deserialize, Serialize};

use super::TradeRecord;

/// Running sums for one aggregation group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VwapTotals {
    pub notional: f64,
    pub volume: i64,
    /// Set once the volume sum leaves the `i64` range; `volume` is then
    /// meaningless.
    pub overflowed: bool,
}

impl VwapTotals {
    pub fn add(&mut self, record: &TradeRecord) {
        self.notional += record.notional();
        match self.volume.checked_add(record.quantity) {
            Some(volume) => self.volume = volume,
            None => self.overflowed = true,
        }
    }

    /// `notional / volume`. Zero or overflowed volume yields NaN.
    pub fn vwap(&self) -> f64 {
        if self.volume == 0 || self.overflowed {
            return f64::NAN;
        }
        self.notional / self.volume as f64
    }

    pub fn has_volume(&self) -> bool {
        self.volume != 0
    }
}

/// VWAP for one `(epic, isin)` instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentVwap {
    pub epic: String,
    pub isin: String,
    pub notional: f64,
    pub volume: i64,
    pub vwap: f64,
}

impl InstrumentVwap {
    pub fn from_totals(epic: impl Into<String>, isin: impl Into<String>, totals: VwapTotals) -> Self {
        Self {
            epic: epic.into(),
            isin: isin.into(),
            notional: totals.notional,
            volume: totals.volume,
            vwap: totals.vwap(),
        }
    }

    /// Same figures relabelled as a trade-type row.
    pub fn with_trade_type(&self, trade_type: impl Into<String>) -> TradeTypeVwap {
        TradeTypeVwap {
            epic: self.epic.clone(),
            isin: self.isin.clone(),
            trade_type: trade_type.into(),
            notional: self.notional,
            volume: self.volume,
            vwap: self.vwap,
        }
    }
}

/// VWAP for one `(epic, isin, trade type)` combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeTypeVwap {
    pub epic: String,
    pub isin: String,
    pub trade_type: String,
    pub notional: f64,
    pub volume: i64,
    pub vwap: f64,
}

impl TradeTypeVwap {
    pub fn from_totals(
        epic: impl Into<String>,
        isin: impl Into<String>,
        trade_type: impl Into<String>,
        totals: VwapTotals,
    ) -> Self {
        Self {
            epic: epic.into(),
            isin: isin.into(),
            trade_type: trade_type.into(),
            notional: totals.notional,
            volume: totals.volume,
            vwap: totals.vwap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_weight_price_by_quantity() {
        let mut totals = VwapTotals::default();
        totals.add(&TradeRecord::new("E", "I", "T", "", 10, 2.0));
        totals.add(&TradeRecord::new("E", "I", "T", "", 20, 3.0));

        assert_eq!(totals.volume, 30);
        assert_eq!(totals.notional, 80.0);
        assert!((totals.vwap() - 80.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn overflowing_volume_is_nan() {
        let mut totals = VwapTotals::default();
        totals.add(&TradeRecord::new("E", "I", "buy", "", i64::MAX, 1.0));
        totals.add(&TradeRecord::new("E", "I", "buy", "", 1, 1.0));

        assert!(totals.overflowed);
        assert!(totals.vwap().is_nan());
    }

    #[test]
    fn zero_volume_is_nan() {
        let mut totals = VwapTotals::default();
        totals.add(&TradeRecord::new("E", "I", "buy", "", 5, 1.0));
        totals.add(&TradeRecord::new("E", "I", "sell", "", -5, 1.2));

        assert!(!totals.has_volume());
        assert!(totals.vwap().is_nan());
    }
}
