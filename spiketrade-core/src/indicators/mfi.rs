//! Money Flow Index (MFI): volume-weighted RSI over typical price.
//!
//! flow[t] = typical[t] * volume[t], classed positive when typical rises and
//! negative when it falls against the previous bar.
//! MFI = 100 - 100 / (1 + Σ positive / Σ negative) over `period` flows.
//! Lookback: period. Edge cases mirror RSI: no negative flow → 100,
//! no flow at all → `None`.

use crate::components::indicator::{Indicator, Series};
use crate::domain::Bar;

use super::sma::rolling_sum;

#[derive(Debug, Clone)]
pub struct Mfi {
    period: usize,
    name: String,
}

impl Mfi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "MFI period must be >= 1");
        Self {
            period,
            name: format!("mfi_{period}"),
        }
    }
}

impl Indicator for Mfi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let n = bars.len();
        let mut positive = vec![None; n];
        let mut negative = vec![None; n];
        for i in 1..n {
            let tp = bars[i].typical_price();
            let prev_tp = bars[i - 1].typical_price();
            let flow = tp * bars[i].volume as f64;
            positive[i] = Some(if tp > prev_tp { flow } else { 0.0 });
            negative[i] = Some(if tp < prev_tp { flow } else { 0.0 });
        }

        rolling_sum(&positive, self.period)
            .into_iter()
            .zip(rolling_sum(&negative, self.period))
            .map(|(pos, neg)| {
                let (pos, neg) = (pos?, neg?);
                if neg == 0.0 {
                    return if pos > 0.0 { Some(100.0) } else { None };
                }
                Some(100.0 - 100.0 / (1.0 + pos / neg))
            })
            .collect()
    }
}
