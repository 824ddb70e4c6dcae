//! Moving Average Convergence/Divergence.

use super::moving_average::ema;

/// Aligned MACD series.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    /// `EMA(fast) - EMA(slow)`.
    pub line: Vec<f64>,
    /// `EMA(signal)` of the MACD line.
    pub signal: Vec<f64>,
    /// `line - signal`.
    pub histogram: Vec<f64>,
}

/// Compute MACD with the given fast/slow/signal periods.
///
/// The line is defined from index `slow - 1` (once both EMAs are), the
/// signal and histogram from `slow + signal - 2`.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);

    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema(&line, signal);
    let histogram = line.iter().zip(&signal_line).map(|(l, s)| l - s).collect();

    Macd {
        line,
        signal: signal_line,
        histogram,
    }
}
