//! Headline metrics: current price and the latest indicator readings.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{models::bar::PriceSource, pipeline::Analysis, presentation::format};

/// Overbought/oversold reading of a bounded oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Overbought,
    Oversold,
    Neutral,
}

impl Zone {
    pub fn caption(&self) -> &'static str {
        match self {
            Zone::Overbought => "Overbought",
            Zone::Oversold => "Oversold",
            Zone::Neutral => "Neutral",
        }
    }

    /// RSI above 70 is overbought, below 30 oversold.
    pub fn from_rsi(rsi: f64) -> Option<Self> {
        Self::classify(rsi, 70.0, 30.0)
    }

    /// CCI above 100 is overbought, below -100 oversold.
    pub fn from_cci(cci: f64) -> Option<Self> {
        Self::classify(cci, 100.0, -100.0)
    }

    fn classify(value: f64, upper: f64, lower: f64) -> Option<Self> {
        if !value.is_finite() {
            None
        } else if value > upper {
            Some(Zone::Overbought)
        } else if value < lower {
            Some(Zone::Oversold)
        } else {
            Some(Zone::Neutral)
        }
    }
}

/// MACD line against its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    pub fn caption(&self) -> &'static str {
        match self {
            Trend::Bullish => "Bullish Signal",
            Trend::Bearish => "Bearish Signal",
        }
    }

    pub fn from_macd(line: f64, signal: f64) -> Option<Self> {
        if !line.is_finite() || !signal.is_finite() {
            return None;
        }
        Some(if line > signal { Trend::Bullish } else { Trend::Bearish })
    }
}

/// Latest price and its move against the previous bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceMetric {
    pub date: NaiveDate,
    pub current: f64,
    /// Absent with a single bar.
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
}

impl PriceMetric {
    pub fn from_prices(dates: &[NaiveDate], prices: &[f64]) -> Option<Self> {
        let (&date, &current) = (dates.last()?, prices.last()?);
        let previous = prices.len().checked_sub(2).map(|i| prices[i]);
        let change = previous.map(|p| current - p);
        let change_pct = previous
            .filter(|p| *p != 0.0)
            .map(|p| (current - p) / p * 100.0);
        Some(Self {
            date,
            current,
            change,
            change_pct,
        })
    }
}

/// The "latest indicator values" block of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub symbol: String,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub bars: usize,
    pub price_source: PriceSource,
    pub price: PriceMetric,
    pub rsi: Option<f64>,
    pub rsi_zone: Option<Zone>,
    pub cci: Option<f64>,
    pub cci_zone: Option<Zone>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_trend: Option<Trend>,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub obv_millions: Option<f64>,
}

fn last(values: &[f64]) -> f64 {
    values.last().copied().unwrap_or(f64::NAN)
}

/// Build the summary for a finished analysis. `None` only for an empty series.
pub fn summarize(analysis: &Analysis) -> Option<Summary> {
    let dates: Vec<NaiveDate> = analysis.series.bars.iter().map(|b| b.date).collect();
    let price = PriceMetric::from_prices(&dates, &analysis.prices())?;
    let set = &analysis.indicators;

    let rsi = last(&set.rsi);
    let cci = last(&set.cci);
    let macd = last(&set.macd);
    let macd_signal = last(&set.macd_signal);

    Some(Summary {
        symbol: analysis.symbol().to_string(),
        first_date: *dates.first()?,
        last_date: price.date,
        bars: dates.len(),
        price_source: analysis.price_source,
        price,
        rsi: format::defined(rsi),
        rsi_zone: Zone::from_rsi(rsi),
        cci: format::defined(cci),
        cci_zone: Zone::from_cci(cci),
        macd: format::defined(macd),
        macd_signal: format::defined(macd_signal),
        macd_trend: Trend::from_macd(macd, macd_signal),
        sma: format::defined(last(&set.sma)),
        ema: format::defined(last(&set.ema)),
        obv_millions: format::defined(format::millions(last(&set.obv))),
    })
}
