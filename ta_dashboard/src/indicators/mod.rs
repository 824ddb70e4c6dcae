//! Indicator engine.
//!
//! Pure, side-effect-free computation of the fixed indicator set over one
//! [`BarSeries`]. Every output series has exactly one value per input bar;
//! positions without enough history hold `NaN`. The input is never sorted,
//! deduplicated or otherwise mutated.
//!
//! | Series                     | Input                     | First defined index |
//! |----------------------------|---------------------------|---------------------|
//! | SMA(20), EMA(20)           | price                     | 19                  |
//! | Bollinger(20, 2σ)          | price                     | 19                  |
//! | MACD line (12, 26)         | price                     | 25                  |
//! | MACD signal/histogram (9)  | MACD line                 | 33                  |
//! | CCI(14)                    | (high + low + close) / 3  | 13                  |
//! | RSI(14)                    | price                     | 14                  |
//! | OBV                        | price, volume             | 0                   |

pub mod bollinger;
pub mod cci;
pub mod macd;
pub mod moving_average;
pub mod obv;
pub mod rsi;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::ValidationError,
    models::{bar::PriceSource, bar_series::BarSeries},
};

/// Window lengths for the indicator set.
///
/// Defaults are the fixed dashboard set; the config file may override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorParams {
    pub sma_period: usize,
    pub ema_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub cci_period: usize,
    pub rsi_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_period: 20,
            ema_period: 20,
            bollinger_period: 20,
            bollinger_std: 2.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            cci_period: 14,
            rsi_period: 14,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let periods = [
            ("sma_period", self.sma_period),
            ("ema_period", self.ema_period),
            ("bollinger_period", self.bollinger_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("cci_period", self.cci_period),
            ("rsi_period", self.rsi_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(ValidationError::InvalidParams {
                message: format!("{name} must be greater than zero"),
            });
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ValidationError::InvalidParams {
                message: format!(
                    "macd_fast ({}) must be shorter than macd_slow ({})",
                    self.macd_fast, self.macd_slow
                ),
            });
        }
        if !self.bollinger_std.is_finite() || self.bollinger_std < 0.0 {
            return Err(ValidationError::InvalidParams {
                message: format!("bollinger_std must be a non-negative number, got {}", self.bollinger_std),
            });
        }
        Ok(())
    }

    /// Longest history any single series needs before its first defined value.
    pub fn longest_warm_up(&self) -> usize {
        [
            self.sma_period,
            self.ema_period,
            self.bollinger_period,
            self.macd_slow + self.macd_signal - 1,
            self.cci_period,
            self.rsi_period + 1,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// The derived series for one bar sequence. All vectors share its length.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub sma: Vec<f64>,
    pub ema: Vec<f64>,
    pub bb_upper: Vec<f64>,
    pub bb_middle: Vec<f64>,
    pub bb_lower: Vec<f64>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_hist: Vec<f64>,
    pub cci: Vec<f64>,
    pub rsi: Vec<f64>,
    /// Raw cumulative volume (not scaled).
    pub obv: Vec<f64>,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.obv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obv.is_empty()
    }

    /// Series paired with their column names, in export order.
    pub fn named_columns(&self, params: &IndicatorParams) -> Vec<(String, &[f64])> {
        vec![
            (format!("SMA_{}", params.sma_period), self.sma.as_slice()),
            (format!("EMA_{}", params.ema_period), self.ema.as_slice()),
            ("BB_upper".to_string(), self.bb_upper.as_slice()),
            ("BB_middle".to_string(), self.bb_middle.as_slice()),
            ("BB_lower".to_string(), self.bb_lower.as_slice()),
            ("MACD".to_string(), self.macd.as_slice()),
            ("MACD_signal".to_string(), self.macd_signal.as_slice()),
            ("MACD_hist".to_string(), self.macd_hist.as_slice()),
            ("CCI".to_string(), self.cci.as_slice()),
            ("RSI".to_string(), self.rsi.as_slice()),
            ("OBV".to_string(), self.obv.as_slice()),
        ]
    }
}

/// Compute the full indicator set for `series`.
///
/// `source` selects the price column for every indicator except CCI, whose
/// typical price always uses the raw high, low and close. Pass a source
/// already resolved with [`BarSeries::resolve_price_source`]; an adjusted
/// close missing on a bar falls back to that bar's close.
///
/// Errors when the parameters are unusable or the series is empty, unordered
/// or malformed. A series too short for a window is not an error: that
/// indicator is simply all `NaN`.
pub fn compute_indicators(
    series: &BarSeries,
    params: &IndicatorParams,
    source: PriceSource,
) -> Result<IndicatorSet, ValidationError> {
    params.validate()?;
    series.validate()?;

    let prices = series.prices(source);
    let typical = series.typical_prices();
    let volumes = series.volumes();

    if prices.len() < params.longest_warm_up() {
        debug!(
            symbol = %series.symbol,
            bars = prices.len(),
            needed = params.longest_warm_up(),
            "series shorter than the longest warm-up; some indicators stay undefined"
        );
    }

    let bands = bollinger::bollinger(&prices, params.bollinger_period, params.bollinger_std);
    let macd = macd::macd(&prices, params.macd_fast, params.macd_slow, params.macd_signal);

    Ok(IndicatorSet {
        sma: moving_average::sma(&prices, params.sma_period),
        ema: moving_average::ema(&prices, params.ema_period),
        bb_upper: bands.upper,
        bb_middle: bands.middle,
        bb_lower: bands.lower,
        macd: macd.line,
        macd_signal: macd.signal,
        macd_hist: macd.histogram,
        cci: cci::cci(&typical, params.cci_period),
        rsi: rsi::rsi(&prices, params.rsi_period),
        obv: obv::obv(&prices, &volumes),
    })
}
