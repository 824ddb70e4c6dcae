#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use ta_dashboard::{
    models::{bar::Bar, bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{DataProvider, ProviderError},
};

pub fn day(offset: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(offset as u64))
        .unwrap()
}

/// One bar per close, consecutive days, high/low one point either side.
pub fn series_from_closes(symbol: &str, closes: &[f64], volumes: &[f64]) -> BarSeries {
    let bars = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| Bar {
            date: day(i),
            open: close - 0.25,
            high: close + 1.0,
            low: close - 1.0,
            close,
            adj_close: Some(close),
            volume,
        })
        .collect();
    BarSeries::new(symbol, bars)
}

/// 40 bars trending up with a weekly wiggle.
pub fn sample_series(symbol: &str) -> BarSeries {
    const WIGGLE: [f64; 7] = [0.0, 1.5, -0.5, 2.0, -1.0, 0.75, -1.25];
    let closes: Vec<f64> = (0..40)
        .map(|i| 100.0 + 0.25 * i as f64 + WIGGLE[i % 7])
        .collect();
    let volumes: Vec<f64> = (0..40).map(|i| 1_000_000.0 + 10_000.0 * i as f64).collect();
    series_from_closes(symbol, &closes, &volumes)
}

/// Returns a fixed response for every request.
pub struct StubProvider {
    pub response: fn(&BarsRequestParams) -> Result<BarSeries, ProviderError>,
}

#[async_trait]
impl DataProvider for StubProvider {
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError> {
        (self.response)(params)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
