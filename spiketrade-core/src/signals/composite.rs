//! Composite reading per bar: score, class, regular-threshold confirmations
//! and trade levels.

use serde::{Deserialize, Serialize};

use super::inputs::columns;
use super::SignalClass;
use crate::components::indicator::IndicatorValues;
use crate::config::TradingSettings;

/// Entry, stop-loss and target prices for a signalled bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeLevels {
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
}

impl TradeLevels {
    pub fn from_close(close: f64, settings: &TradingSettings) -> Self {
        Self {
            entry: close,
            stop: close * (1.0 - settings.stop_loss_pct),
            target: close * (1.0 + settings.target_gain_percent / 100.0),
        }
    }

    /// Reward over risk; `None` when the stop equals the entry.
    pub fn reward_to_risk(&self) -> Option<f64> {
        let risk = self.entry - self.stop;
        if risk.abs() < f64::EPSILON {
            return None;
        }
        Some((self.target - self.entry) / risk)
    }
}

/// Everything the engine concludes about one bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalReading {
    pub score: Option<f64>,
    pub class: SignalClass,
    /// Number of regular-threshold checks that passed (0..=8).
    pub confirmations: u8,
    pub levels: Option<TradeLevels>,
}

impl SignalReading {
    pub fn new(
        score: Option<f64>,
        price_roc_z: Option<f64>,
        confirmations: u8,
        close: f64,
        settings: &TradingSettings,
    ) -> Self {
        let class = classify(score, price_roc_z, settings);
        let levels = class
            .is_signal()
            .then(|| TradeLevels::from_close(close, settings));
        Self {
            score,
            class,
            confirmations,
            levels,
        }
    }

    pub fn is_signal(&self) -> bool {
        self.class.is_signal()
    }
}

/// Map a composite score to a class.
pub fn classify(
    score: Option<f64>,
    price_roc_z: Option<f64>,
    settings: &TradingSettings,
) -> SignalClass {
    let Some(score) = score else {
        return SignalClass::None;
    };
    if score >= settings.high_prob_threshold {
        SignalClass::HighProbability
    } else if score >= settings.combo_signal_threshold {
        let spiking = price_roc_z.is_some_and(|z| z >= settings.spike_price_roc_z_threshold);
        if spiking {
            SignalClass::Spike
        } else {
            SignalClass::Regular
        }
    } else {
        SignalClass::None
    }
}

/// Count the raw regular-threshold checks passing at bar `i`. Missing values
/// fail their check.
pub fn count_confirmations(inputs: &IndicatorValues, i: usize, settings: &TradingSettings) -> u8 {
    let checks = [
        (columns::PRICE_ROC, settings.regular_price_roc_threshold),
        (columns::RSI_CHANGE, settings.regular_rsi_roc_threshold),
        (columns::OBV_ROC, settings.regular_obv_roc_threshold),
        (columns::MFI_CHANGE, settings.regular_mfi_roc_threshold),
        (columns::PERCENT_B_CHANGE, settings.regular_percent_b_roc_threshold),
        (columns::VWAP_DEV, settings.regular_vwap_roc_threshold),
        (columns::VOLUME_CHANGE, settings.regular_volume_roc_threshold),
        (columns::MACD_HIST_CHANGE, settings.macd_histogram_roc_threshold),
    ];
    checks
        .iter()
        .filter(|(name, threshold)| inputs.get(name, i).is_some_and(|v| v >= *threshold))
        .count() as u8
}
