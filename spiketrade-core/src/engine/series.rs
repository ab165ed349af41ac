//! The core indicator columns every frame carries: RSI, three EMAs, MACD.

use serde::{Deserialize, Serialize};

use crate::components::indicator::Series;
use crate::config::TradingSettings;
use crate::indicators::{calculate_ema, calculate_macd, calculate_rsi, MacdSeries};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub rsi: Series,
    /// Periods of `ema_fast`, `ema_mid` and `ema_slow`.
    pub ema_periods: [usize; 3],
    pub ema_fast: Series,
    pub ema_mid: Series,
    pub ema_slow: Series,
    pub macd: MacdSeries,
}

impl IndicatorSeries {
    /// Compute all core columns over `closes` in one pass per indicator.
    pub fn compute(closes: &[f64], settings: &TradingSettings) -> Self {
        let [fast, mid, slow] = settings.ema_periods;
        Self {
            rsi: calculate_rsi(closes, settings.rsi_length_minutes),
            ema_periods: settings.ema_periods,
            ema_fast: calculate_ema(closes, fast),
            ema_mid: calculate_ema(closes, mid),
            ema_slow: calculate_ema(closes, slow),
            macd: calculate_macd(
                closes,
                settings.macd_fast,
                settings.macd_slow,
                settings.macd_signal,
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_match_input_length() {
        let closes: Vec<f64> = (0..40).map(|i| 1.0 + i as f64 * 0.01).collect();
        let series = IndicatorSeries::compute(&closes, &TradingSettings::default());
        assert_eq!(series.len(), 40);
        assert_eq!(series.ema_fast.len(), 40);
        assert_eq!(series.ema_slow.len(), 40);
        assert_eq!(series.macd.len(), 40);
        assert_eq!(series.ema_periods, [9, 20, 50]);
    }

    #[test]
    fn empty_closes() {
        let series = IndicatorSeries::compute(&[], &TradingSettings::default());
        assert!(series.is_empty());
        assert!(series.macd.is_empty());
    }
}
