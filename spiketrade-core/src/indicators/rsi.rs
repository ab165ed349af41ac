//! Relative Strength Index (RSI), simple-moving-average variant.
//!
//! delta[t] = close[t] - close[t-1]
//! avg_gain = rolling mean of max(delta, 0) over `period` deltas
//! avg_loss = rolling mean of max(-delta, 0) over `period` deltas
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//!
//! Lookback: period (index 0 has no delta).
//! Edge cases: avg_loss == 0 with avg_gain > 0 → 100 (the rs → ∞ limit);
//! avg_gain == avg_loss == 0 → None (0/0, no movement).

use crate::components::indicator::Series;

use super::sma::rolling_mean;
use super::to_series;

/// RSI of a close column.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Series {
    let values = to_series(closes);
    let n = values.len();

    let mut gains = vec![None; n];
    let mut losses = vec![None; n];
    for i in 1..n {
        if let (Some(curr), Some(prev)) = (values[i], values[i - 1]) {
            let delta = curr - prev;
            gains[i] = Some(delta.max(0.0));
            losses[i] = Some((-delta).max(0.0));
        }
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .into_iter()
        .zip(avg_loss)
        .map(|(g, l)| rsi_from_averages(g?, l?))
        .collect()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { Some(100.0) } else { None };
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}
