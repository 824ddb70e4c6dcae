// =============================================================================
// Bollinger Bands
// =============================================================================
//
// middle = SMA(n)
// upper  = middle + k * sigma
// lower  = middle - k * sigma
//
// sigma is the population standard deviation of the same trailing window.

/// Aligned Bollinger Band series.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Population standard deviation of each trailing window of `period` values.
///
/// Two-pass per window so a flat window yields exactly zero.
pub fn rolling_std(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let period_f = period as f64;
    for (i, window) in values.windows(period).enumerate() {
        let mean = window.iter().sum::<f64>() / period_f;
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f;
        out[i + period - 1] = variance.sqrt();
    }
    out
}

/// Calculate Bollinger Bands for `values` with a `period` window and
/// `num_std` standard deviations.
pub fn bollinger(values: &[f64], period: usize, num_std: f64) -> BollingerBands {
    let middle = super::moving_average::sma(values, period);
    let sigma = rolling_std(values, period);

    let upper = middle
        .iter()
        .zip(&sigma)
        .map(|(m, s)| m + num_std * s)
        .collect();
    let lower = middle
        .iter()
        .zip(&sigma)
        .map(|(m, s)| m - num_std * s)
        .collect();

    BollingerBands {
        upper,
        middle,
        lower,
    }
}
