//! Normalized sub-signals.
//!
//! Z-score inputs map to `clamp(z / spike_threshold, 0, 1)`; threshold
//! conditions map to 0 or 1. A sub-signal is `None` whenever any input it
//! reads is missing at that bar.

use serde::{Deserialize, Serialize};

use super::inputs::columns;
use crate::components::indicator::IndicatorValues;
use crate::config::{SignalWeights, StrategyConfig};

/// The ten normalized sub-signals of one bar, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubSignals {
    pub price_roc: Option<f64>,
    pub vwap: Option<f64>,
    pub volume_spike: Option<f64>,
    pub rsi_oversold: Option<f64>,
    pub rvol_high: Option<f64>,
    pub obv_roc: Option<f64>,
    pub mfi: Option<f64>,
    pub spike_quality: Option<f64>,
    pub ema_downtrend: Option<f64>,
    pub stoch_oversold: Option<f64>,
}

impl SubSignals {
    /// Values in the same order as `SignalWeights::entries`.
    pub fn values(&self) -> [Option<f64>; 10] {
        [
            self.price_roc,
            self.vwap,
            self.volume_spike,
            self.rsi_oversold,
            self.rvol_high,
            self.obv_roc,
            self.mfi,
            self.spike_quality,
            self.ema_downtrend,
            self.stoch_oversold,
        ]
    }

    pub fn is_complete(&self) -> bool {
        self.values().iter().all(Option::is_some)
    }

    /// Σ wᵢ·vᵢ / Σ wᵢ, or `None` if any sub-signal is missing or the weights
    /// sum to zero.
    pub fn weighted_score(&self, weights: &SignalWeights) -> Option<f64> {
        let total = weights.total();
        if total <= 0.0 {
            return None;
        }
        let mut sum = 0.0;
        for ((_, weight), value) in weights.entries().iter().zip(self.values()) {
            sum += weight * value?;
        }
        Some((sum / total).clamp(0.0, 1.0))
    }
}

/// Normalize the sub-signals of bar `i`.
///
/// `rsi`, `ema_fast` and `ema_mid` are the core indicator readings at `i`.
pub fn normalize(
    inputs: &IndicatorValues,
    i: usize,
    rsi: Option<f64>,
    ema_fast: Option<f64>,
    ema_mid: Option<f64>,
    config: &StrategyConfig,
) -> SubSignals {
    let s = &config.settings;
    let z = |name: &str| inputs.get(name, i);

    let spike_checks = [
        (z(columns::PRICE_ROC_Z), s.spike_price_roc_z_threshold),
        (z(columns::RSI_CHANGE_Z), s.spike_rsi_roc_z_threshold),
        (z(columns::OBV_CHANGE_Z), s.spike_obv_roc_z_threshold),
        (z(columns::MFI_CHANGE_Z), s.spike_mfi_roc_z_threshold),
        (z(columns::PERCENT_B_CHANGE_Z), s.spike_percent_b_roc_z_threshold),
        (z(columns::VWAP_DEV_Z), s.spike_vwap_roc_z_threshold),
        (z(columns::VOLUME_Z), s.spike_volume_roc_z_threshold),
    ];
    let spike_quality = spike_checks
        .iter()
        .try_fold(0usize, |passed, (value, threshold)| {
            value.map(|v| passed + usize::from(v >= *threshold))
        })
        .map(|passed| passed as f64 / spike_checks.len() as f64);

    SubSignals {
        price_roc: scaled(z(columns::PRICE_ROC_Z), s.spike_price_roc_z_threshold),
        vwap: scaled(z(columns::VWAP_DEV_Z), s.spike_vwap_roc_z_threshold),
        volume_spike: scaled(z(columns::VOLUME_Z), s.spike_volume_roc_z_threshold),
        rsi_oversold: rsi.map(|r| flag(r < s.rsi_oversold_threshold)),
        rvol_high: z(columns::RVOL).map(|r| flag(r >= s.rvol_threshold)),
        obv_roc: scaled(z(columns::OBV_CHANGE_Z), s.spike_obv_roc_z_threshold),
        mfi: scaled(z(columns::MFI_CHANGE_Z), s.spike_mfi_roc_z_threshold),
        spike_quality,
        ema_downtrend: ema_fast.zip(ema_mid).map(|(fast, mid)| flag(fast < mid)),
        stoch_oversold: z(columns::STOCH_K).map(|k| flag(k < s.stochastic_oversold_threshold)),
    }
}

fn scaled(z: Option<f64>, threshold: f64) -> Option<f64> {
    z.map(|z| (z / threshold).clamp(0.0, 1.0))
}

fn flag(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}
