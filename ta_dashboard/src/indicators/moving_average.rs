//! Simple and exponential moving averages.
//!
//! Both return a vector the same length as the input. Positions without a
//! full window of history are `NaN`.

/// Simple moving average: mean of the trailing `period` values.
///
/// The first `period - 1` outputs are `NaN`. A `period` of zero, or an input
/// shorter than `period`, yields an all-`NaN` vector.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let period_f = period as f64;
    for (i, window) in values.windows(period).enumerate() {
        out[i + period - 1] = window.iter().sum::<f64>() / period_f;
    }
    out
}

/// Exponential moving average with `alpha = 2 / (period + 1)`.
///
/// Seeded with the SMA of the first `period` defined values, placed at the
/// last index of that window. Leading `NaN`s in the input (e.g. a MACD line
/// still warming up) are skipped before the seed window starts.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 {
        return out;
    }
    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return out;
    };
    let seed_idx = start + period - 1;
    if seed_idx >= values.len() {
        return out;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = values[start..=seed_idx].iter().sum::<f64>() / period as f64;
    out[seed_idx] = prev;

    for (slot, &value) in out[seed_idx + 1..].iter_mut().zip(&values[seed_idx + 1..]) {
        prev = alpha * value + (1.0 - alpha) * prev;
        *slot = prev;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (1..=n).map(|x| x as f64).collect()
    }

    #[test]
    fn sma_warm_up_and_values() {
        let out = sma(&ramp(5), 3);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_eq!(&out[2..], &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn sma_too_short_is_all_nan() {
        let out = sma(&ramp(4), 5);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn sma_period_zero_is_all_nan() {
        assert!(sma(&ramp(4), 0).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn ema_seed_is_sma_then_recursive() {
        let values = ramp(6);
        let out = ema(&values, 3);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_eq!(out[2], 2.0);
        // alpha = 0.5
        assert!((out[3] - 3.0).abs() < 1e-12);
        assert!((out[4] - 4.0).abs() < 1e-12);
        assert!((out[5] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn ema_skips_leading_nan() {
        let values = [f64::NAN, f64::NAN, 2.0, 4.0, 6.0, 8.0];
        let out = ema(&values, 2);
        assert!(out[..3].iter().all(|v| v.is_nan()));
        assert_eq!(out[3], 3.0);
        // alpha = 2/3: 2/3*6 + 1/3*3
        assert!((out[4] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn ema_of_constant_is_constant() {
        let out = ema(&[42.0; 30], 20);
        assert!(out[..19].iter().all(|v| v.is_nan()));
        for v in &out[19..] {
            assert!((v - 42.0).abs() < 1e-9, "expected 42, got {v}");
        }
    }
}
