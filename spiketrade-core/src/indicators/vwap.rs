//! Rolling Volume-Weighted Average Price (VWAP) and close deviation from it.
//!
//! VWAP[t] = Σ typical * volume / Σ volume over the last `period` bars
//! DEV[t]  = (close[t] - VWAP[t]) / VWAP[t] * 100
//! Lookback: period - 1. A window with zero total volume → `None`.

use crate::components::indicator::{Indicator, Series};
use crate::domain::Bar;

use super::sma::rolling_sum;

fn rolling_vwap(bars: &[Bar], period: usize) -> Series {
    let pv: Series = bars
        .iter()
        .map(|b| Some(b.typical_price() * b.volume as f64))
        .collect();
    let vol: Series = bars.iter().map(|b| Some(b.volume as f64)).collect();

    rolling_sum(&pv, period)
        .into_iter()
        .zip(rolling_sum(&vol, period))
        .map(|(pv, v)| match (pv, v) {
            (Some(pv), Some(v)) if v > 0.0 => Some(pv / v),
            _ => None,
        })
        .collect()
}

/// Percentage distance of the close above (positive) or below the rolling VWAP.
#[derive(Debug, Clone)]
pub struct VwapDeviation {
    period: usize,
    name: String,
}

impl VwapDeviation {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "VWAP period must be >= 1");
        Self {
            period,
            name: format!("vwap_dev_{period}"),
        }
    }
}

impl Indicator for VwapDeviation {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        rolling_vwap(bars, self.period)
            .into_iter()
            .zip(bars)
            .map(|(vwap, bar)| {
                let vwap = vwap?;
                if vwap == 0.0 {
                    None
                } else {
                    Some((bar.close - vwap) / vwap * 100.0)
                }
            })
            .collect()
    }
}
