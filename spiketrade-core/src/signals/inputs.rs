//! Raw sub-signal inputs: the oscillator and volume columns the composite
//! score is normalized from, plus the raw changes the regular-threshold
//! confirmations are checked against.
//!
//! Every column is index-aligned with the bars and stored in an
//! `IndicatorValues` under the names in [`columns`].

use crate::components::indicator::{Indicator, IndicatorValues, Series};
use crate::config::StrategyConfig;
use crate::domain::{closes, volumes, Bar};
use crate::indicators::bollinger::DEFAULT_MULTIPLIER;
use crate::indicators::{
    change_of_series, roc_of_series, rolling_zscore, to_series, Mfi, Obv, PercentB, Rvol,
    Stochastic, VwapDeviation,
};

/// Column names of the sub-signal inputs.
pub mod columns {
    pub const PRICE_ROC: &str = "price_roc";
    pub const PRICE_ROC_Z: &str = "price_roc_z";
    pub const VWAP_DEV: &str = "vwap_dev";
    pub const VWAP_DEV_Z: &str = "vwap_dev_z";
    pub const VOLUME_Z: &str = "volume_z";
    pub const VOLUME_CHANGE: &str = "volume_change";
    pub const RVOL: &str = "rvol";
    pub const OBV: &str = "obv";
    pub const OBV_ROC: &str = "obv_roc";
    pub const OBV_CHANGE_Z: &str = "obv_change_z";
    pub const MFI: &str = "mfi";
    pub const MFI_CHANGE: &str = "mfi_change";
    pub const MFI_CHANGE_Z: &str = "mfi_change_z";
    pub const RSI_CHANGE: &str = "rsi_change";
    pub const RSI_CHANGE_Z: &str = "rsi_change_z";
    pub const PERCENT_B: &str = "percent_b";
    pub const PERCENT_B_CHANGE: &str = "percent_b_change";
    pub const PERCENT_B_CHANGE_Z: &str = "percent_b_change_z";
    pub const STOCH_K: &str = "stoch_k";
    pub const MACD_HIST_CHANGE: &str = "macd_hist_change";
}

/// Compute all sub-signal input columns.
///
/// `rsi` and `macd_histogram` come from the core indicator pass so they are
/// not computed twice.
pub fn compute_inputs(
    bars: &[Bar],
    config: &StrategyConfig,
    rsi: &[Option<f64>],
    macd_histogram: &[Option<f64>],
) -> IndicatorValues {
    let s = &config.settings;
    let z_window = s.buy_period_minutes;
    let mut values = IndicatorValues::new();

    let bar_indicators: [(&str, Box<dyn Indicator>); 6] = [
        (columns::VWAP_DEV, Box::new(VwapDeviation::new(s.vwap_period_minutes))),
        (columns::RVOL, Box::new(Rvol::new(z_window))),
        (columns::OBV, Box::new(Obv::new())),
        (columns::MFI, Box::new(Mfi::new(s.mfi_period_minutes))),
        (
            columns::PERCENT_B,
            Box::new(PercentB::new(s.bb_length_minutes, DEFAULT_MULTIPLIER)),
        ),
        (
            columns::STOCH_K,
            Box::new(Stochastic::new(s.stochastic_period_minutes)),
        ),
    ];
    for (column, indicator) in &bar_indicators {
        let series = indicator.compute(bars);
        debug_assert_eq!(
            series.len(),
            bars.len(),
            "indicator '{}' produced {} values for {} bars",
            indicator.name(),
            series.len(),
            bars.len()
        );
        values.insert(*column, series);
    }

    let close_series = to_series(&closes(bars));
    let volume_series = to_series(&volumes(bars));

    let price_roc = roc_of_series(&close_series, s.price_roc_period_minutes);
    values.insert(columns::PRICE_ROC_Z, rolling_zscore(&price_roc, z_window));
    values.insert(columns::PRICE_ROC, price_roc);

    let vwap_dev_z = rolling_zscore(column(&values, columns::VWAP_DEV), z_window);
    values.insert(columns::VWAP_DEV_Z, vwap_dev_z);

    values.insert(columns::VOLUME_Z, rolling_zscore(&volume_series, z_window));
    values.insert(columns::VOLUME_CHANGE, roc_of_series(&volume_series, 1));

    let obv = column(&values, columns::OBV).to_vec();
    let obv_change = change_of_series(&obv, s.obv_roc_period_minutes);
    values.insert(columns::OBV_CHANGE_Z, rolling_zscore(&obv_change, z_window));
    values.insert(columns::OBV_ROC, roc_of_series(&obv, s.obv_roc_period_minutes));

    let mfi_change = change_of_series(column(&values, columns::MFI), 1);
    values.insert(columns::MFI_CHANGE_Z, rolling_zscore(&mfi_change, z_window));
    values.insert(columns::MFI_CHANGE, mfi_change);

    let rsi_change = change_of_series(rsi, 1);
    values.insert(columns::RSI_CHANGE_Z, rolling_zscore(&rsi_change, z_window));
    values.insert(columns::RSI_CHANGE, rsi_change);

    // %B is a fraction; its change is reported in percent units
    let percent_b_change: Series = change_of_series(column(&values, columns::PERCENT_B), 1)
        .into_iter()
        .map(|v| v.map(|c| c * 100.0))
        .collect();
    values.insert(
        columns::PERCENT_B_CHANGE_Z,
        rolling_zscore(&percent_b_change, z_window),
    );
    values.insert(columns::PERCENT_B_CHANGE, percent_b_change);

    values.insert(columns::MACD_HIST_CHANGE, change_of_series(macd_histogram, 1));

    values
}

fn column<'a>(values: &'a IndicatorValues, name: &str) -> &'a [Option<f64>] {
    values.get_series(name).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{calculate_macd, calculate_rsi, make_bars_with_volume};

    fn wavy_bars(n: usize) -> Vec<Bar> {
        let closes: Vec<f64> = (0..n)
            .map(|i| 1.0 + (i as f64 * 0.37).sin() * 0.1 + i as f64 * 0.001)
            .collect();
        let vols: Vec<u64> = (0..n).map(|i| 1000 + (i as u64 * 37) % 500).collect();
        make_bars_with_volume(&closes, &vols)
    }

    #[test]
    fn every_column_is_aligned() {
        let bars = wavy_bars(120);
        let config = StrategyConfig::default();
        let c: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let rsi = calculate_rsi(&c, 14);
        let macd = calculate_macd(&c, 12, 26, 9);
        let values = compute_inputs(&bars, &config, &rsi, &macd.histogram);

        assert_eq!(values.len(), 20);
        for name in values.names() {
            assert_eq!(values.get_series(name).unwrap().len(), bars.len(), "{name}");
        }
    }

    #[test]
    fn z_columns_wait_for_full_window() {
        let bars = wavy_bars(120);
        let config = StrategyConfig::default();
        let c: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let rsi = calculate_rsi(&c, 14);
        let macd = calculate_macd(&c, 12, 26, 9);
        let values = compute_inputs(&bars, &config, &rsi, &macd.histogram);

        // price ROC(20) defined from bar 20; z over 48 values from bar 67
        assert!(values.get(columns::PRICE_ROC, 19).is_none());
        assert!(values.get(columns::PRICE_ROC, 20).is_some());
        assert!(values.get(columns::PRICE_ROC_Z, 66).is_none());
        assert!(values.get(columns::PRICE_ROC_Z, 67).is_some());
    }

    #[test]
    fn empty_bars_give_empty_columns() {
        let config = StrategyConfig::default();
        let values = compute_inputs(&[], &config, &[], &[]);
        for name in values.names() {
            assert!(values.get_series(name).unwrap().is_empty());
        }
    }
}
