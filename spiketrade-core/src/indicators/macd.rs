//! Moving Average Convergence Divergence (MACD).
//!
//! MACD = EMA(fast) - EMA(slow)
//! Signal = EMA(MACD, signal)
//! Histogram = MACD - Signal
//!
//! All EMAs are adjust=false, so the three columns are defined from index 0.

use serde::{Deserialize, Serialize};

use crate::components::indicator::Series;

use super::ema::{calculate_ema, ema_of_series};

/// The three aligned MACD columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub macd: Series,
    pub signal: Series,
    pub histogram: Series,
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// MACD of raw prices. Conventional periods are 12/26/9.
pub fn calculate_macd(prices: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let fast_ema = calculate_ema(prices, fast);
    let slow_ema = calculate_ema(prices, slow);

    let macd: Series = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal_line = ema_of_series(&macd, signal);
    let histogram = macd
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| Some((*m)? - (*s)?))
        .collect();

    MacdSeries {
        macd,
        signal: signal_line,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn macd_constant_series_is_zero() {
        let m = calculate_macd(&[3.0; 40], 12, 26, 9);
        assert_eq!(m.len(), 40);
        for i in 0..40 {
            assert_approx(m.macd[i], 0.0, DEFAULT_EPSILON);
            assert_approx(m.signal[i], 0.0, DEFAULT_EPSILON);
            assert_approx(m.histogram[i], 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn macd_known_values() {
        // fast=1 → EMA is the price itself; slow=3 → k=0.5; signal=1 → signal == macd
        // prices 10, 12: slow EMA = 10, 11 → MACD = 0, 1
        let m = calculate_macd(&[10.0, 12.0], 1, 3, 1);
        assert_approx(m.macd[0], 0.0, DEFAULT_EPSILON);
        assert_approx(m.macd[1], 1.0, DEFAULT_EPSILON);
        assert_approx(m.signal[1], 1.0, DEFAULT_EPSILON);
        assert_approx(m.histogram[1], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn histogram_identity() {
        let prices: Vec<f64> = (0..60).map(|i| 1.0 + (i as f64 * 0.3).sin() * 0.2).collect();
        let m = calculate_macd(&prices, 12, 26, 9);
        for i in 0..prices.len() {
            let expected = m.macd[i].unwrap() - m.signal[i].unwrap();
            assert_approx(m.histogram[i], expected, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rising_prices_give_positive_macd() {
        let prices: Vec<f64> = (0..50).map(|i| 1.0 + i as f64 * 0.01).collect();
        let m = calculate_macd(&prices, 12, 26, 9);
        assert!(m.macd[49].unwrap() > 0.0);
    }

    #[test]
    fn macd_empty() {
        assert!(calculate_macd(&[], 12, 26, 9).is_empty());
    }
}
