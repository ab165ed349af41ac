//! Concrete indicator implementations.
//!
//! Each indicator exposes a free function over a raw column (`calculate_*` or
//! `*_of_series`) and, where it reads bars directly, a struct implementing the
//! `Indicator` trait. All outputs are `Series`: index-aligned with the input,
//! `None` through the warm-up window.
//!
//! Multi-series indicators (MACD) return a struct of aligned columns instead of
//! stretching the single-series `Indicator` trait.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod obv;
pub mod roc;
pub mod rsi;
pub mod rvol;
pub mod sma;
pub mod stochastic;
pub mod vwap;
pub mod zscore;

pub use bollinger::{percent_b_of_series, PercentB};
pub use ema::calculate_ema;
pub use macd::{calculate_macd, MacdSeries};
pub use mfi::Mfi;
pub use obv::{obv_of_bars, Obv};
pub use roc::{change_of_series, roc_of_series};
pub use rsi::calculate_rsi;
pub use rvol::Rvol;
pub use sma::rolling_mean;
pub use stochastic::Stochastic;
pub use vwap::VwapDeviation;
pub use zscore::rolling_zscore;

/// Lift a raw column into a `Series`, mapping non-finite values to `None`.
pub fn to_series(values: &[f64]) -> crate::components::Series {
    values
        .iter()
        .map(|&v| if v.is_finite() { Some(v) } else { None })
        .collect()
}

/// Create synthetic one-minute bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 0.01, low = min(open,close) - 0.01, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    make_bars_with_volume(closes, &vec![1000; closes.len()])
}

/// Like `make_bars`, with an explicit volume per bar.
#[cfg(test)]
pub fn make_bars_with_volume(closes: &[f64], volumes: &[u64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: start + chrono::Duration::minutes(i as i64),
                open,
                high: open.max(close) + 0.01,
                low: open.min(close) - 0.01,
                close,
                volume,
            }
        })
        .collect()
}

/// Assert a series value is present and approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: Option<f64>, expected: f64, epsilon: f64) {
    let actual = actual.unwrap_or_else(|| panic!("assert_approx: expected {expected}, got None"));
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
