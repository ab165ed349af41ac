//! On-Balance Volume (OBV).
//!
//! OBV[0] = 0; OBV[t] = OBV[t-1] ± volume[t] by the sign of the close change
//! (unchanged close adds nothing). Lookback: 0.

use crate::components::indicator::{Indicator, Series};
use crate::domain::Bar;

/// Cumulative OBV column.
pub fn obv_of_bars(bars: &[Bar]) -> Series {
    let mut result = Vec::with_capacity(bars.len());
    let mut obv = 0.0;
    for (i, bar) in bars.iter().enumerate() {
        if i > 0 {
            let prev = bars[i - 1].close;
            if bar.close > prev {
                obv += bar.volume as f64;
            } else if bar.close < prev {
                obv -= bar.volume as f64;
            }
        }
        result.push(Some(obv));
    }
    result
}

#[derive(Debug, Clone, Default)]
pub struct Obv;

impl Obv {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for Obv {
    fn name(&self) -> &str {
        "obv"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        obv_of_bars(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars_with_volume;

    #[test]
    fn obv_accumulates_signed_volume() {
        let bars = make_bars_with_volume(&[1.0, 1.1, 1.05, 1.05, 1.2], &[100, 200, 50, 70, 30]);
        let result = Obv::new().compute(&bars);
        assert_eq!(
            result,
            vec![Some(0.0), Some(200.0), Some(150.0), Some(150.0), Some(180.0)]
        );
    }

    #[test]
    fn obv_empty() {
        assert!(obv_of_bars(&[]).is_empty());
    }
}
