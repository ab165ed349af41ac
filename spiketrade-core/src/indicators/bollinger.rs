//! Bollinger %B: where the close sits inside the Bollinger Bands.
//!
//! middle = SMA(close, period)
//! upper/lower = middle ± mult * stddev(close, period)
//! %B = (close - lower) / (upper - lower)
//!
//! Uses population stddev (divide by N). 0 = lower band, 1 = upper band;
//! values outside [0, 1] mean the close is outside the bands.
//! Lookback: period - 1. A flat window (zero band width) → `None`.

use crate::components::indicator::{Indicator, Series};
use crate::domain::Bar;

use super::to_series;

/// Conventional band width in standard deviations.
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// %B of an arbitrary column.
pub fn percent_b_of_series(values: &[Option<f64>], period: usize, multiplier: f64) -> Series {
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
        let width = 2.0 * multiplier * variance.sqrt();
        if width <= 0.0 || !width.is_finite() {
            continue;
        }
        let lower = mean - multiplier * variance.sqrt();
        result[i] = Some((window[period - 1] - lower) / width);
    }

    result
}

#[derive(Debug, Clone)]
pub struct PercentB {
    period: usize,
    multiplier: f64,
    name: String,
}

impl PercentB {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            multiplier,
            name: format!("percent_b_{period}"),
        }
    }
}

impl Indicator for PercentB {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        percent_b_of_series(&to_series(&closes), self.period, self.multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn percent_b_known_value() {
        // window [1, 2, 3]: mean 2, std sqrt(2/3); close 3
        // %B = (3 - (2 - 2s)) / 4s = (1 + 2s) / 4s
        let s = (2.0_f64 / 3.0).sqrt();
        let result = PercentB::new(3, 2.0).compute(&make_bars(&[1.0, 2.0, 3.0]));
        assert!(result[1].is_none());
        assert_approx(result[2], (1.0 + 2.0 * s) / (4.0 * s), DEFAULT_EPSILON);
    }

    #[test]
    fn close_at_mean_is_half() {
        let result = percent_b_of_series(&to_series(&[1.0, 3.0, 2.0]), 3, 2.0);
        assert_approx(result[2], 0.5, DEFAULT_EPSILON);
    }

    #[test]
    fn flat_window_is_missing() {
        let result = percent_b_of_series(&to_series(&[4.0; 5]), 3, 2.0);
        assert!(result.iter().all(|v| v.is_none()));
    }
}
