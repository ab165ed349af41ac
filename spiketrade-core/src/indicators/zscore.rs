//! Rolling z-score.
//!
//! z[t] = (x[t] - mean) / std over the window x[t-period+1..=t], population
//! standard deviation (divide by N). The current value is part of its own
//! window. Lookback: period - 1, plus whatever the input needs.
//! A window with (near) zero variance has no meaningful z-score → `None`.

use crate::components::indicator::Series;

const MIN_STD: f64 = 1e-12;

pub fn rolling_zscore(values: &[Option<f64>], period: usize) -> Series {
    let n = values.len();
    let mut result = vec![None; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window: Option<Vec<f64>> = values[(i + 1 - period)..=i].iter().copied().collect();
        let Some(window) = window else {
            continue;
        };
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period as f64;
        let std = variance.sqrt();
        if std < MIN_STD {
            continue;
        }
        result[i] = Some((window[period - 1] - mean) / std);
    }

    result
}
