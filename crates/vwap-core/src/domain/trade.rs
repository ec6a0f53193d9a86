use serde::{Deserialize, Serialize};

/// One executed trade as read from the source file.
///
/// Quantity and price are carried as given; zero and negative values are
/// legal input and flow into the aggregates unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub epic: String,
    pub isin: String,
    pub trade_type: String,
    /// Fourth descriptive column; kept for display, never aggregated.
    pub reserved: String,
    pub quantity: i64,
    pub price: f64,
}

impl TradeRecord {
    pub fn new(
        epic: impl Into<String>,
        isin: impl Into<String>,
        trade_type: impl Into<String>,
        reserved: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> Self {
        Self {
            epic: epic.into(),
            isin: isin.into(),
            trade_type: trade_type.into(),
            reserved: reserved.into(),
            quantity,
            price,
        }
    }

    /// `quantity * price` for this trade.
    pub fn notional(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}
