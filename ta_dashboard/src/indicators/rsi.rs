// =============================================================================
// Relative Strength Index (RSI), Wilder's smoothing
// =============================================================================
//
// Step 1: price changes from consecutive values.
// Step 2: seed average gain / average loss with the simple mean of the first
//         `period` gains / losses. The first RSI lands on index `period`.
// Step 3: avg = (prev_avg * (period - 1) + current) / period
// Step 4: RS = avg_gain / avg_loss, RSI = 100 - 100 / (1 + RS)
//
// avg_loss == 0 with gains  => 100
// avg_loss == 0 and no gains => NaN (no movement, undefined)
// =============================================================================

/// Compute the full RSI series, aligned with `values`.
///
/// The first `period` outputs are `NaN` (they only feed the seed averages).
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }

    let period_f = period as f64;
    let (sum_gain, sum_loss) = values[..=period]
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0_f64, 0.0_f64), |(g, l), d| {
            if d > 0.0 { (g + d, l) } else { (g, l - d) }
        });

    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;
    out[period] = rsi_from_averages(avg_gain, avg_loss);

    for i in period + 1..values.len() {
        let delta = values[i] - values[i - 1];
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        out[i] = rsi_from_averages(avg_gain, avg_loss);
    }

    out
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 { f64::NAN } else { 100.0 }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}
