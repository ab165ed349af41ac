//! Rate of Change (ROC) and point change.
//!
//! ROC[t] = (x[t] - x[t-period]) / |x[t-period]| * 100
//! CHANGE[t] = x[t] - x[t-period]
//! Lookback: period. A zero base makes ROC undefined (`None`).
//!
//! The absolute value in the ROC denominator keeps the sign meaningful for
//! series that cross zero (OBV).

use crate::components::indicator::Series;

/// Percentage change over `period` bars.
pub fn roc_of_series(values: &[Option<f64>], period: usize) -> Series {
    lagged(values, period, |curr, prev| {
        if prev == 0.0 {
            None
        } else {
            Some((curr - prev) / prev.abs() * 100.0)
        }
    })
}

/// Point change over `period` bars (used for bounded oscillators like RSI/MFI).
pub fn change_of_series(values: &[Option<f64>], period: usize) -> Series {
    lagged(values, period, |curr, prev| Some(curr - prev))
}

fn lagged(
    values: &[Option<f64>],
    period: usize,
    f: impl Fn(f64, f64) -> Option<f64>,
) -> Series {
    let n = values.len();
    let mut result = vec![None; n];
    if period == 0 {
        return result;
    }
    for i in period..n {
        if let (Some(curr), Some(prev)) = (values[i], values[i - period]) {
            result[i] = f(curr, prev);
        }
    }
    result
}
