use proptest::prelude::*;
use ta_dashboard::indicators::{
    bollinger::bollinger, macd::macd, moving_average::{ema, sma}, obv::obv, rsi::rsi,
};

fn prices(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(1.0f64..1_000.0, len)
}

proptest! {
    #[test]
    fn sma_warm_up_and_trailing_mean(values in prices(20..80)) {
        let out = sma(&values, 20);
        prop_assert_eq!(out.len(), values.len());
        prop_assert_eq!(out.iter().take_while(|v| v.is_nan()).count(), 19);
        for i in 19..values.len() {
            let mean = values[i - 19..=i].iter().sum::<f64>() / 20.0;
            prop_assert!((out[i] - mean).abs() <= 1e-9 * mean.abs().max(1.0));
        }
    }

    #[test]
    fn ema_of_constant_is_constant(c in 1.0f64..1_000.0, len in 20usize..60) {
        let out = ema(&vec![c; len], 20);
        prop_assert!(out[..19].iter().all(|v| v.is_nan()));
        for v in &out[19..] {
            prop_assert!((v - c).abs() <= 1e-9 * c);
        }
    }

    #[test]
    fn bollinger_width_and_middle(values in prices(20..60)) {
        let bands = bollinger(&values, 20, 2.0);
        let mid = sma(&values, 20);
        for i in 19..values.len() {
            let window = &values[i - 19..=i];
            let mean = window.iter().sum::<f64>() / 20.0;
            let var = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 20.0;
            let width = bands.upper[i] - bands.lower[i];
            prop_assert!((width - 4.0 * var.sqrt()).abs() <= 1e-6);
            prop_assert!((bands.middle[i] - mid[i]).abs() <= 1e-9);
        }
    }

    #[test]
    fn macd_histogram_is_line_minus_signal(values in prices(34..100)) {
        let m = macd(&values, 12, 26, 9);
        prop_assert!(m.line[..25].iter().all(|v| v.is_nan()));
        prop_assert!(!m.line[25].is_nan());
        prop_assert!(m.signal[..33].iter().all(|v| v.is_nan()));
        for i in 33..values.len() {
            prop_assert_eq!(m.histogram[i], m.line[i] - m.signal[i]);
        }
    }

    #[test]
    fn rsi_is_bounded(values in prices(15..80)) {
        for v in rsi(&values, 14).into_iter().filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn rsi_is_100_without_losses(start in 1.0f64..100.0, steps in proptest::collection::vec(0.01f64..5.0, 15..40)) {
        let mut values = vec![start];
        for s in steps {
            let last = *values.last().unwrap();
            values.push(last + s);
        }
        let out = rsi(&values, 14);
        prop_assert!(out[14..].iter().all(|v| *v == 100.0));
    }

    #[test]
    fn obv_non_decreasing_for_rising_prices(
        steps in proptest::collection::vec(0.0f64..3.0, 2..50),
        volume in 1.0f64..1e7,
    ) {
        let mut values = vec![10.0];
        for s in &steps {
            let last = *values.last().unwrap();
            values.push(last + s);
        }
        let volumes = vec![volume; values.len()];
        let out = obv(&values, &volumes);
        prop_assert_eq!(out[0], 0.0);
        prop_assert!(out.windows(2).all(|w| w[1] >= w[0]));
    }
}

#[test]
fn obv_up_then_equal_down_returns_to_start() {
    let out = obv(&[10.0, 11.0, 10.0], &[500.0, 500.0, 500.0]);
    assert_eq!(out, vec![0.0, 500.0, 0.0]);
}
