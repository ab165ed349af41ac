//! Relative Volume (RVOL).
//!
//! RVOL[t] = volume[t] / mean(volume[t-period..t]): the current bar against
//! the average of the `period` bars before it. Lookback: period.
//! Zero average volume → `None`.

use crate::components::indicator::{Indicator, Series};
use crate::domain::Bar;

use super::sma::rolling_mean;

#[derive(Debug, Clone)]
pub struct Rvol {
    period: usize,
    name: String,
}

impl Rvol {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RVOL period must be >= 1");
        Self {
            period,
            name: format!("rvol_{period}"),
        }
    }
}

impl Indicator for Rvol {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Series {
        let volumes: Series = bars.iter().map(|b| Some(b.volume as f64)).collect();
        let averages = rolling_mean(&volumes, self.period);

        (0..bars.len())
            .map(|i| {
                let avg = averages.get(i.checked_sub(1)?).copied().flatten()?;
                if avg > 0.0 {
                    Some(bars[i].volume as f64 / avg)
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars_with_volume, DEFAULT_EPSILON};

    #[test]
    fn rvol_against_prior_average() {
        let bars = make_bars_with_volume(&[1.0, 1.0, 1.0, 1.0], &[100, 300, 200, 600]);
        let result = Rvol::new(2).compute(&bars);
        assert!(result[0].is_none());
        assert!(result[1].is_none());
        // prior avg (100 + 300) / 2 = 200
        assert_approx(result[2], 1.0, DEFAULT_EPSILON);
        // prior avg (300 + 200) / 2 = 250
        assert_approx(result[3], 2.4, DEFAULT_EPSILON);
    }

    #[test]
    fn zero_history_is_missing() {
        let bars = make_bars_with_volume(&[1.0, 1.0, 1.0], &[0, 0, 500]);
        let result = Rvol::new(2).compute(&bars);
        assert!(result[2].is_none());
    }
}
