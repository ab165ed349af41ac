//! Simple moving average and the rolling-window sum behind it.
//!
//! A window is defined only when it holds `period` present values, matching a
//! rolling mean with `min_periods = window`. Each window is summed directly so
//! that an all-zero window sums to exactly zero (RSI relies on this).
//! Lookback: period - 1.

use crate::components::indicator::Series;

/// Rolling sum over a full window of `period` values.
pub fn rolling_sum(values: &[Option<f64>], period: usize) -> Series {
    let n = values.len();
    let mut result = vec![None; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[(i + 1 - period)..=i];
        result[i] = window
            .iter()
            .try_fold(0.0, |acc, v| v.map(|x| acc + x));
    }

    result
}

/// Rolling arithmetic mean over a full window of `period` values.
pub fn rolling_mean(values: &[Option<f64>], period: usize) -> Series {
    rolling_sum(values, period)
        .into_iter()
        .map(|s| s.map(|sum| sum / period as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, to_series, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let values = to_series(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        let result = rolling_mean(&values, 5);

        assert_eq!(result.len(), 7);
        for (i, v) in result.iter().enumerate().take(4) {
            assert!(v.is_none(), "expected None at index {i}");
        }
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
        assert_approx(result[5], 13.0, DEFAULT_EPSILON);
        assert_approx(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_identity() {
        let result = rolling_mean(&to_series(&[100.0, 200.0, 300.0]), 1);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn missing_value_poisons_only_its_windows() {
        let values = vec![Some(10.0), Some(11.0), None, Some(13.0), Some(14.0), Some(15.0)];
        let result = rolling_mean(&values, 3);
        assert!(result[2].is_none());
        assert!(result[3].is_none());
        assert!(result[4].is_none());
        assert_approx(result[5], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn zero_window_sums_to_exact_zero() {
        let values = vec![Some(0.1), Some(0.2), Some(0.0), Some(0.0)];
        let result = rolling_sum(&values, 2);
        assert_eq!(result[3], Some(0.0));
    }

    #[test]
    fn sma_too_few_values() {
        let result = rolling_mean(&to_series(&[10.0, 11.0]), 5);
        assert!(result.iter().all(|v| v.is_none()));
    }

    #[test]
    fn zero_period_is_all_missing() {
        let result = rolling_mean(&[Some(1.0), Some(2.0)], 0);
        assert_eq!(result, vec![None, None]);
    }
}
