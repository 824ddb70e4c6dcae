//! On-Balance Volume.

/// Cumulative volume flow, starting at 0 on the first bar.
///
/// Adds the bar's volume when the price rose against the previous bar,
/// subtracts it when the price fell, and carries the total when unchanged.
/// Values are raw volume units; any display scaling is up to the caller.
pub fn obv(prices: &[f64], volumes: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return out;
    }

    let mut running = 0.0;
    out.push(running);
    for (pair, volume) in prices.windows(2).zip(&volumes[1..]) {
        if pair[1] > pair[0] {
            running += volume;
        } else if pair[1] < pair[0] {
            running -= volume;
        }
        out.push(running);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(obv(&[], &[]).is_empty());
    }

    #[test]
    fn up_down_flat() {
        let out = obv(&[10.0, 11.0, 10.5, 10.5], &[100.0, 200.0, 50.0, 999.0]);
        assert_eq!(out, vec![0.0, 200.0, 150.0, 150.0]);
    }

    #[test]
    fn up_then_equal_down_returns_to_start() {
        let out = obv(&[10.0, 11.0, 10.0], &[500.0, 300.0, 300.0]);
        assert_eq!(out.last(), Some(&0.0));
    }
}
