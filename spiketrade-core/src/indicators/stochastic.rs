//! Stochastic oscillator %K.
//!
//! %K = (close - lowest low) / (highest high - lowest low) * 100 over `period` bars.
//! Lookback: period - 1. A zero-range window → `None`.

use crate::components::indicator::{Indicator, Series};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    name: String,
}

impl Stochastic {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Stochastic period must be >= 1");
        Self {
            period,
            name: format!("stoch_k_{period}"),
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let n = bars.len();
        let mut result = vec![None; n];
        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &bars[(i + 1 - self.period)..=i];
            let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
            let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            let range = highest - lowest;
            if range > 0.0 && range.is_finite() {
                result[i] = Some((bars[i].close - lowest) / range * 100.0);
            }
        }

        result
    }
}
