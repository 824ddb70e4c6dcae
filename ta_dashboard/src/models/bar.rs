//! Canonical in-memory representation of one trading day (OHLCV).
//!
//! This struct is the standard output of every
//! [`DataProvider`](crate::providers::DataProvider) implementation, regardless
//! of which vendor supplied the data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading day (exchange-local calendar date).
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the day.
    pub high: f64,

    /// Lowest price during the day.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Close adjusted for splits and dividends. Not all providers supply this.
    pub adj_close: Option<f64>,

    /// Volume traded during the day.
    pub volume: f64,
}

impl Bar {
    /// Typical price `(high + low + close) / 3`, the input to CCI.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Which price column the indicators are computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum PriceSource {
    /// Split/dividend adjusted close, when the provider supplies it for every bar.
    #[default]
    AdjustedClose,
    /// Raw close.
    Close,
}

impl PriceSource {
    /// Column header used in charts and exports.
    pub fn label(&self) -> &'static str {
        match self {
            PriceSource::AdjustedClose => "Adj Close",
            PriceSource::Close => "Close",
        }
    }
}
