//! Strategy configuration: indicator periods, signal thresholds, sub-signal weights.
//!
//! A `StrategyConfig` is immutable for the duration of a computation. Keys use
//! the camelCase names of the calibrated dashboard settings so existing
//! settings files load unchanged; weight keys are snake_case.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Periods and thresholds. Periods are in bars (one-minute bars in practice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradingSettings {
    /// Rolling window for z-scores and the RVOL baseline.
    pub buy_period_minutes: usize,
    pub bb_length_minutes: usize,
    pub rsi_length_minutes: usize,
    pub price_roc_period_minutes: usize,
    pub obv_roc_period_minutes: usize,
    pub mfi_period_minutes: usize,
    pub vwap_period_minutes: usize,
    pub stochastic_period_minutes: usize,
    pub ema_periods: [usize; 3],
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,

    pub spike_price_roc_z_threshold: f64,
    pub spike_rsi_roc_z_threshold: f64,
    pub spike_obv_roc_z_threshold: f64,
    pub spike_mfi_roc_z_threshold: f64,
    pub spike_percent_b_roc_z_threshold: f64,
    pub spike_vwap_roc_z_threshold: f64,
    pub spike_volume_roc_z_threshold: f64,

    pub regular_price_roc_threshold: f64,
    pub regular_rsi_roc_threshold: f64,
    pub regular_obv_roc_threshold: f64,
    pub regular_mfi_roc_threshold: f64,
    pub regular_percent_b_roc_threshold: f64,
    pub regular_vwap_roc_threshold: f64,
    pub regular_volume_roc_threshold: f64,
    pub macd_histogram_roc_threshold: f64,

    pub combo_signal_threshold: f64,
    pub high_prob_threshold: f64,
    pub stop_loss_pct: f64,
    pub target_gain_percent: f64,
    pub rsi_oversold_threshold: f64,
    pub stochastic_oversold_threshold: f64,
    pub rvol_threshold: f64,
}

impl Default for TradingSettings {
    fn default() -> Self {
        Self {
            buy_period_minutes: 48,
            bb_length_minutes: 24,
            rsi_length_minutes: 14,
            price_roc_period_minutes: 20,
            obv_roc_period_minutes: 20,
            mfi_period_minutes: 14,
            vwap_period_minutes: 10,
            stochastic_period_minutes: 14,
            ema_periods: [9, 20, 50],
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,

            spike_price_roc_z_threshold: 1.0,
            spike_rsi_roc_z_threshold: 0.5,
            spike_obv_roc_z_threshold: 0.5,
            spike_mfi_roc_z_threshold: 0.6,
            spike_percent_b_roc_z_threshold: 0.5,
            spike_vwap_roc_z_threshold: 0.5,
            spike_volume_roc_z_threshold: 0.5,

            regular_price_roc_threshold: 2.0,
            regular_rsi_roc_threshold: 5.0,
            regular_obv_roc_threshold: 10.0,
            regular_mfi_roc_threshold: 5.0,
            regular_percent_b_roc_threshold: 15.0,
            regular_vwap_roc_threshold: 1.5,
            regular_volume_roc_threshold: 20.0,
            macd_histogram_roc_threshold: 0.5,

            combo_signal_threshold: 0.76,
            high_prob_threshold: 0.8,
            stop_loss_pct: 0.02,
            target_gain_percent: 2.0,
            rsi_oversold_threshold: 30.0,
            stochastic_oversold_threshold: 30.0,
            rvol_threshold: 1.2,
        }
    }
}

/// Weight of each sub-signal in the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub price_roc: f64,
    pub vwap: f64,
    pub volume_spike: f64,
    pub rsi_oversold: f64,
    pub rvol_high: f64,
    pub obv_roc: f64,
    pub mfi: f64,
    pub spike_quality: f64,
    pub ema_downtrend: f64,
    pub stoch_oversold: f64,
}

impl Default for SignalWeights {
    /// Calibrated weights.
    fn default() -> Self {
        Self {
            price_roc: 0.44,
            vwap: 0.25,
            volume_spike: 0.49,
            rsi_oversold: 0.85,
            rvol_high: 0.44,
            obv_roc: 0.51,
            mfi: 0.67,
            spike_quality: 0.48,
            ema_downtrend: 0.46,
            stoch_oversold: 0.47,
        }
    }
}

impl SignalWeights {
    /// (name, weight) pairs in a fixed order.
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("price_roc", self.price_roc),
            ("vwap", self.vwap),
            ("volume_spike", self.volume_spike),
            ("rsi_oversold", self.rsi_oversold),
            ("rvol_high", self.rvol_high),
            ("obv_roc", self.obv_roc),
            ("mfi", self.mfi),
            ("spike_quality", self.spike_quality),
            ("ema_downtrend", self.ema_downtrend),
            ("stoch_oversold", self.stoch_oversold),
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub settings: TradingSettings,
    pub weights: SignalWeights,
}

impl StrategyConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string. Missing keys take
    /// their calibrated defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// BLAKE3 hex digest of the canonical JSON form. Identical configs share
    /// a fingerprint, so rendered output can be traced to its settings.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(self).expect("StrategyConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Longest single indicator period.
    pub fn max_period(&self) -> usize {
        let s = &self.settings;
        [
            s.buy_period_minutes,
            s.bb_length_minutes,
            s.rsi_length_minutes,
            s.price_roc_period_minutes,
            s.obv_roc_period_minutes,
            s.mfi_period_minutes,
            s.vwap_period_minutes,
            s.stochastic_period_minutes,
            s.macd_slow,
            s.macd_signal,
        ]
        .into_iter()
        .chain(s.ema_periods)
        .max()
        .unwrap_or(0)
    }

    /// Number of leading bars for which no composite score can exist: every
    /// sub-signal needs its indicator warm-up plus a full z-score window.
    pub fn warmup_bars(&self) -> usize {
        let s = &self.settings;
        let z = s.buy_period_minutes;
        [
            (s.price_roc_period_minutes + z).saturating_sub(1),
            (s.vwap_period_minutes + z).saturating_sub(2),
            z, // RVOL baseline
            s.rsi_length_minutes + z,
            (s.obv_roc_period_minutes + z).saturating_sub(1),
            s.mfi_period_minutes + z,
            (s.bb_length_minutes + z).saturating_sub(1),
            s.stochastic_period_minutes.saturating_sub(1),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// Check ranges. Periods must be at least one bar, weights non-negative
    /// with a positive total, thresholds finite and ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.settings;

        let periods: [(&'static str, usize); 12] = [
            ("buyPeriodMinutes", s.buy_period_minutes),
            ("bbLengthMinutes", s.bb_length_minutes),
            ("rsiLengthMinutes", s.rsi_length_minutes),
            ("priceRocPeriodMinutes", s.price_roc_period_minutes),
            ("obvRocPeriodMinutes", s.obv_roc_period_minutes),
            ("mfiPeriodMinutes", s.mfi_period_minutes),
            ("vwapPeriodMinutes", s.vwap_period_minutes),
            ("stochasticPeriodMinutes", s.stochastic_period_minutes),
            ("emaPeriods", s.ema_periods.into_iter().min().unwrap_or(0)),
            ("macdFast", s.macd_fast),
            ("macdSlow", s.macd_slow),
            ("macdSignal", s.macd_signal),
        ];
        for (field, period) in periods {
            if period == 0 {
                return Err(invalid(field, "period must be >= 1"));
            }
        }
        if s.buy_period_minutes < 2 {
            return Err(invalid(
                "buyPeriodMinutes",
                "z-score window needs at least 2 bars",
            ));
        }

        let thresholds: [(&'static str, f64); 22] = [
            ("spikePriceRocZThreshold", s.spike_price_roc_z_threshold),
            ("spikeRsiRocZThreshold", s.spike_rsi_roc_z_threshold),
            ("spikeObvRocZThreshold", s.spike_obv_roc_z_threshold),
            ("spikeMfiRocZThreshold", s.spike_mfi_roc_z_threshold),
            ("spikePercentBRocZThreshold", s.spike_percent_b_roc_z_threshold),
            ("spikeVwapRocZThreshold", s.spike_vwap_roc_z_threshold),
            ("spikeVolumeRocZThreshold", s.spike_volume_roc_z_threshold),
            ("regularPriceRocThreshold", s.regular_price_roc_threshold),
            ("regularRsiRocThreshold", s.regular_rsi_roc_threshold),
            ("regularObvRocThreshold", s.regular_obv_roc_threshold),
            ("regularMfiRocThreshold", s.regular_mfi_roc_threshold),
            ("regularPercentBRocThreshold", s.regular_percent_b_roc_threshold),
            ("regularVwapRocThreshold", s.regular_vwap_roc_threshold),
            ("regularVolumeRocThreshold", s.regular_volume_roc_threshold),
            ("macdHistogramRocThreshold", s.macd_histogram_roc_threshold),
            ("comboSignalThreshold", s.combo_signal_threshold),
            ("highProbThreshold", s.high_prob_threshold),
            ("stopLossPct", s.stop_loss_pct),
            ("targetGainPercent", s.target_gain_percent),
            ("rsiOversoldThreshold", s.rsi_oversold_threshold),
            ("stochasticOversoldThreshold", s.stochastic_oversold_threshold),
            ("rvolThreshold", s.rvol_threshold),
        ];
        for (field, value) in thresholds {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {value}")));
            }
        }
        for (field, z) in &thresholds[..7] {
            if *z <= 0.0 {
                return Err(invalid(*field, format!("z threshold must be > 0, got {z}")));
            }
        }
        if s.combo_signal_threshold > s.high_prob_threshold {
            return Err(invalid(
                "comboSignalThreshold",
                format!(
                    "{} exceeds highProbThreshold {}",
                    s.combo_signal_threshold, s.high_prob_threshold
                ),
            ));
        }
        if !(0.0..1.0).contains(&s.stop_loss_pct) {
            return Err(invalid(
                "stopLossPct",
                format!("must be in [0, 1), got {}", s.stop_loss_pct),
            ));
        }

        for (name, weight) in self.weights.entries() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Invalid {
                    field: "weights",
                    reason: format!("{name} must be a non-negative number, got {weight}"),
                });
            }
        }
        if self.weights.total() <= 0.0 {
            return Err(invalid("weights", "total weight must be positive"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = StrategyConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.total() - 5.06).abs() < 1e-9);
    }

    #[test]
    fn toml_roundtrip() {
        let config = StrategyConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("comboSignalThreshold"));
        assert!(text.contains("rsi_oversold"));
        let parsed = StrategyConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let text = r#"
            [settings]
            rsiLengthMinutes = 7
            comboSignalThreshold = 0.6

            [weights]
            mfi = 1.0
        "#;
        let config = StrategyConfig::from_toml(text).unwrap();
        assert_eq!(config.settings.rsi_length_minutes, 7);
        assert_eq!(config.settings.combo_signal_threshold, 0.6);
        assert_eq!(config.settings.buy_period_minutes, 48);
        assert_eq!(config.weights.mfi, 1.0);
        assert_eq!(config.weights.price_roc, 0.44);
    }

    #[test]
    fn zero_period_rejected() {
        let text = "[settings]\nrsiLengthMinutes = 0\n";
        let err = StrategyConfig::from_toml(text).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "rsiLengthMinutes", .. }
        ));
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let mut config = StrategyConfig::default();
        config.settings.combo_signal_threshold = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_weight_rejected() {
        let mut config = StrategyConfig::default();
        config.weights.vwap = -0.1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("vwap"));
    }

    #[test]
    fn all_zero_weights_rejected() {
        let mut config = StrategyConfig::default();
        config.weights = SignalWeights {
            price_roc: 0.0,
            vwap: 0.0,
            volume_spike: 0.0,
            rsi_oversold: 0.0,
            rvol_high: 0.0,
            obv_roc: 0.0,
            mfi: 0.0,
            spike_quality: 0.0,
            ema_downtrend: 0.0,
            stoch_oversold: 0.0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = StrategyConfig::from_toml("[settings\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn fingerprint_tracks_params() {
        let a = StrategyConfig::default();
        let mut b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.settings.rvol_threshold = 1.5;
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn periods_summary() {
        let config = StrategyConfig::default();
        assert_eq!(config.max_period(), 50);
        // %B change z-score: %B from bar 23, change from 24, full window at 24 + 47
        assert_eq!(config.warmup_bars(), 24 + 48 - 1);
    }
}
