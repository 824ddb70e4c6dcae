use chrono::DateTime;
use serde::Deserialize;

use crate::{
    models::{bar::Bar, bar_series::BarSeries},
    providers::{ApiSnafu, InternalSnafu, NotFoundSnafu, ProviderError},
};

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Absent when the range holds no trading days.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Deserialize, Debug)]
pub struct ChartMeta {
    pub symbol: String,
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
    #[serde(default)]
    pub adjclose: Vec<AdjClose>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

fn at<T: Copy>(column: &[Option<T>], i: usize) -> Option<T> {
    column.get(i).copied().flatten()
}

impl ChartEnvelope {
    /// Convert the columnar chart payload into a [`BarSeries`].
    ///
    /// Rows missing any of open/high/low/close are skipped (Yahoo emits them
    /// for halted days); a missing volume counts as zero.
    pub fn into_series(self, symbol: &str) -> Result<BarSeries, ProviderError> {
        if let Some(error) = self.chart.error {
            if error.code.eq_ignore_ascii_case("Not Found") {
                return NotFoundSnafu { symbol }.fail();
            }
            return ApiSnafu {
                message: format!("{}: {}", error.code, error.description),
            }
            .fail();
        }

        let Some(result) = self.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(BarSeries::new(symbol, vec![]));
        };

        let offset = result.meta.gmtoffset;
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
        let adjclose = result
            .indicators
            .adjclose
            .into_iter()
            .next()
            .unwrap_or_default()
            .adjclose;

        let mut bars = Vec::with_capacity(result.timestamp.len());
        for (i, ts) in result.timestamp.iter().enumerate() {
            let (Some(open), Some(high), Some(low), Some(close)) = (
                at(&quote.open, i),
                at(&quote.high, i),
                at(&quote.low, i),
                at(&quote.close, i),
            ) else {
                continue;
            };

            let date = DateTime::from_timestamp(ts + offset, 0)
                .ok_or_else(|| {
                    InternalSnafu {
                        message: format!("timestamp {ts} out of range"),
                    }
                    .build()
                })?
                .date_naive();

            bars.push(Bar {
                date,
                open,
                high,
                low,
                close,
                adj_close: at(&adjclose, i),
                volume: at(&quote.volume, i).unwrap_or(0.0),
            });
        }

        Ok(BarSeries::new(result.meta.symbol, bars))
    }
}
