//! Commodity Channel Index.
//!
//! `CCI = (TP - SMA(TP, n)) / (0.015 * mean deviation)` where
//! `TP = (high + low + close) / 3`.

const LAMBERT: f64 = 0.015;

/// Compute CCI over `period` from a typical-price series.
///
/// A flat window (every typical price identical) has zero mean deviation and
/// yields `NaN`. Any real spread, however small next to the price level, gives
/// a finite value.
pub fn cci(typical_prices: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; typical_prices.len()];
    if period == 0 || typical_prices.len() < period {
        return out;
    }

    let period_f = period as f64;
    for (i, window) in typical_prices.windows(period).enumerate() {
        // The computed mean of a flat window can be off by an ulp, so test
        // flatness on the inputs rather than on the deviation.
        if window.iter().all(|tp| *tp == window[0]) {
            continue;
        }
        let mean = window.iter().sum::<f64>() / period_f;
        let mean_dev = window.iter().map(|tp| (tp - mean).abs()).sum::<f64>() / period_f;
        if mean_dev == 0.0 {
            continue;
        }
        let current = window[period - 1];
        out[i + period - 1] = (current - mean) / (LAMBERT * mean_dev);
    }
    out
}
