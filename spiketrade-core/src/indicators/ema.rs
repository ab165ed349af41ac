//! Exponential Moving Average (EMA).
//!
//! Recursive, without lookback bias (adjust=false):
//! EMA[0] = x[0], EMA[t] = k * x[t] + (1 - k) * EMA[t-1], k = 2 / (period + 1).
//! Lookback: 0. A missing or non-finite input ends the series: that index and
//! every later one are `None`.

use crate::components::indicator::Series;

use super::to_series;

/// EMA of raw prices.
pub fn calculate_ema(prices: &[f64], period: usize) -> Series {
    ema_of_series(&to_series(prices), period)
}

/// EMA of an already-derived column (used for the MACD signal line).
pub fn ema_of_series(values: &[Option<f64>], period: usize) -> Series {
    let n = values.len();
    let mut result = vec![None; n];
    if period == 0 {
        return result;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut prev: Option<f64> = None;
    for (i, value) in values.iter().enumerate() {
        let Some(x) = *value else {
            return result;
        };
        let ema = match prev {
            None => x,
            Some(p) => k * x + (1.0 - k) * p,
        };
        result[i] = Some(ema);
        prev = Some(ema);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_period_1_equals_price() {
        let result = calculate_ema(&[100.0, 200.0, 300.0], 1);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_3_known_values() {
        // k = 2/(3+1) = 0.5, seeded with the first price
        // EMA[0] = 10
        // EMA[1] = 0.5*11 + 0.5*10 = 10.5
        // EMA[2] = 0.5*12 + 0.5*10.5 = 11.25
        // EMA[3] = 0.5*13 + 0.5*11.25 = 12.125
        let result = calculate_ema(&[10.0, 11.0, 12.0, 13.0], 3);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 10.5, DEFAULT_EPSILON);
        assert_approx(result[2], 11.25, DEFAULT_EPSILON);
        assert_approx(result[3], 12.125, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_defined_from_first_bar() {
        let result = calculate_ema(&[5.0, 6.0], 50);
        assert!(result.iter().all(|v| v.is_some()));
    }

    #[test]
    fn ema_nan_ends_series() {
        let result = calculate_ema(&[10.0, 11.0, f64::NAN, 13.0], 3);
        assert!(result[1].is_some());
        assert!(result[2].is_none());
        assert!(result[3].is_none());
    }

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 9).is_empty());
    }
}
