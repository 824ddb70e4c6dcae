//! A validated, date-ordered collection of daily bars for one symbol.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::ValidationError;
use crate::models::bar::{Bar, PriceSource};

/// Represents a complete set of daily bars for a single symbol.
///
/// Bars are kept in the order the provider returned them. Nothing in this
/// crate sorts or deduplicates them; [`BarSeries::validate`] rejects input
/// that is not strictly ascending instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// The collection of OHLCV bars, ascending by date.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Check the invariants the indicator engine relies on.
    ///
    /// Errors:
    /// - no bars at all
    /// - a date that is not strictly after its predecessor
    /// - a non-finite price, or a negative / non-finite volume
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bars.is_empty() {
            return Err(ValidationError::EmptySeries {
                symbol: self.symbol.clone(),
            });
        }

        for (index, bar) in self.bars.iter().enumerate() {
            let prices = [bar.open, bar.high, bar.low, bar.close];
            if prices.iter().any(|p| !p.is_finite())
                || bar.adj_close.is_some_and(|p| !p.is_finite())
            {
                return Err(ValidationError::MalformedBar {
                    date: bar.date,
                    message: "price is not a finite number".into(),
                });
            }
            if !bar.volume.is_finite() || bar.volume < 0.0 {
                return Err(ValidationError::MalformedBar {
                    date: bar.date,
                    message: format!("invalid volume {}", bar.volume),
                });
            }
            if index > 0 {
                let previous = self.bars[index - 1].date;
                if bar.date <= previous {
                    return Err(ValidationError::NonMonotonicDates {
                        index,
                        previous,
                        current: bar.date,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Per-bar `(high + low + close) / 3`, always from the raw columns.
    pub fn typical_prices(&self) -> Vec<f64> {
        self.bars.iter().map(Bar::typical_price).collect()
    }

    /// Whether every bar carries an adjusted close.
    pub fn has_adjusted_close(&self) -> bool {
        !self.bars.is_empty() && self.bars.iter().all(|b| b.adj_close.is_some())
    }

    /// Resolve the requested price source against what the provider supplied.
    ///
    /// Adjusted close is only used when *every* bar has one; otherwise the
    /// whole series falls back to the raw close so the two are never mixed.
    pub fn resolve_price_source(&self, requested: PriceSource) -> PriceSource {
        match requested {
            PriceSource::AdjustedClose if self.has_adjusted_close() => PriceSource::AdjustedClose,
            PriceSource::AdjustedClose => {
                warn!(
                    symbol = %self.symbol,
                    "adjusted close not available for every bar, falling back to close"
                );
                PriceSource::Close
            }
            PriceSource::Close => PriceSource::Close,
        }
    }

    /// Price column for an already resolved source.
    pub fn prices(&self, source: PriceSource) -> Vec<f64> {
        match source {
            PriceSource::AdjustedClose => self
                .bars
                .iter()
                .map(|b| b.adj_close.unwrap_or(b.close))
                .collect(),
            PriceSource::Close => self.closes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64, adj: Option<f64>) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            adj_close: adj,
            volume: 100.0,
        }
    }

    #[test]
    fn valid_series_passes() {
        let series = BarSeries::new("AAPL", vec![bar(1, 10.0, None), bar(4, 11.0, None)]);
        assert!(series.validate().is_ok());
    }

    #[test]
    fn typical_prices_ignore_adjusted_close() {
        let series = BarSeries::new("AAPL", vec![bar(1, 10.0, Some(5.0)), bar(2, 13.0, Some(6.5))]);
        assert_eq!(series.typical_prices(), vec![10.0, 13.0]);
    }

    #[test]
    fn empty_series_rejected() {
        let series = BarSeries::new("AAPL", vec![]);
        assert!(matches!(
            series.validate(),
            Err(ValidationError::EmptySeries { .. })
        ));
    }

    #[test]
    fn duplicate_and_descending_dates_rejected() {
        let dup = BarSeries::new("AAPL", vec![bar(1, 10.0, None), bar(1, 11.0, None)]);
        assert!(matches!(
            dup.validate(),
            Err(ValidationError::NonMonotonicDates { index: 1, .. })
        ));

        let desc = BarSeries::new(
            "AAPL",
            vec![bar(5, 10.0, None), bar(6, 10.0, None), bar(2, 11.0, None)],
        );
        assert!(matches!(
            desc.validate(),
            Err(ValidationError::NonMonotonicDates { index: 2, .. })
        ));
    }

    #[test]
    fn negative_volume_and_nan_price_rejected() {
        let mut b = bar(1, 10.0, None);
        b.volume = -1.0;
        assert!(matches!(
            BarSeries::new("X", vec![b]).validate(),
            Err(ValidationError::MalformedBar { .. })
        ));

        let mut b = bar(1, 10.0, None);
        b.high = f64::NAN;
        assert!(matches!(
            BarSeries::new("X", vec![b]).validate(),
            Err(ValidationError::MalformedBar { .. })
        ));
    }

    #[test]
    fn adjusted_close_used_only_when_complete() {
        let full = BarSeries::new("X", vec![bar(1, 10.0, Some(9.5)), bar(2, 11.0, Some(10.5))]);
        assert_eq!(
            full.resolve_price_source(PriceSource::AdjustedClose),
            PriceSource::AdjustedClose
        );
        assert_eq!(full.prices(PriceSource::AdjustedClose), vec![9.5, 10.5]);

        let partial = BarSeries::new("X", vec![bar(1, 10.0, Some(9.5)), bar(2, 11.0, None)]);
        assert_eq!(
            partial.resolve_price_source(PriceSource::AdjustedClose),
            PriceSource::Close
        );
        assert_eq!(partial.prices(PriceSource::Close), vec![10.0, 11.0]);
    }
}
