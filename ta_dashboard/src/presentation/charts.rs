//! Chart panels: which series are drawn together, under which title.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{pipeline::Analysis, presentation::format};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl NamedSeries {
    fn new(name: impl Into<String>, values: &[f64]) -> Self {
        Self {
            name: name.into(),
            values: values.to_vec(),
        }
    }
}

/// One chart: a title and the series plotted on it, date-aligned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    pub title: String,
    pub dates: Vec<NaiveDate>,
    pub series: Vec<NamedSeries>,
}

impl ChartPanel {
    /// Rows `(date, values...)` for the last `n` dates.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = (NaiveDate, Vec<f64>)> + '_ {
        let start = self.dates.len().saturating_sub(n);
        (start..self.dates.len()).map(move |i| {
            let row = self.series.iter().map(|s| s.values[i]).collect();
            (self.dates[i], row)
        })
    }
}

/// The dashboard's panels, in display order. OBV is scaled to millions here
/// and nowhere else.
pub fn chart_panels(analysis: &Analysis) -> Vec<ChartPanel> {
    let ticker = analysis.symbol();
    let dates: Vec<NaiveDate> = analysis.series.bars.iter().map(|b| b.date).collect();
    let prices = analysis.prices();
    let price_name = analysis.price_source.label();
    let set = &analysis.indicators;
    let params = &analysis.params;

    let obv_millions: Vec<f64> = set.obv.iter().map(|v| format::millions(*v)).collect();

    let panel = |title: String, series: Vec<NamedSeries>| ChartPanel {
        title,
        dates: dates.clone(),
        series,
    };

    vec![
        panel(
            format!("Price Chart - {ticker}"),
            vec![NamedSeries::new(price_name, &prices)],
        ),
        panel(
            format!("Moving Averages - {ticker}"),
            vec![
                NamedSeries::new(price_name, &prices),
                NamedSeries::new(format!("SMA_{}", params.sma_period), &set.sma),
                NamedSeries::new(format!("EMA_{}", params.ema_period), &set.ema),
            ],
        ),
        panel(
            format!("Bollinger Bands - {ticker}"),
            vec![
                NamedSeries::new(price_name, &prices),
                NamedSeries::new("BB_upper", &set.bb_upper),
                NamedSeries::new("BB_middle", &set.bb_middle),
                NamedSeries::new("BB_lower", &set.bb_lower),
            ],
        ),
        panel(
            format!("MACD - {ticker}"),
            vec![
                NamedSeries::new("MACD", &set.macd),
                NamedSeries::new("MACD_signal", &set.macd_signal),
            ],
        ),
        panel(
            format!("Relative Strength Index (RSI) - {ticker}"),
            vec![NamedSeries::new("RSI", &set.rsi)],
        ),
        panel(
            format!("Commodity Channel Index (CCI) - {ticker}"),
            vec![NamedSeries::new("CCI", &set.cci)],
        ),
        panel(
            format!("On Balance Volume (Millions) - {ticker}"),
            vec![NamedSeries::new("OBV", &obv_millions)],
        ),
    ]
}
