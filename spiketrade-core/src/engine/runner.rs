//! Single-pass signal computation over a bar series.

use tracing::{debug, warn};

use super::frame::SignalFrame;
use super::series::IndicatorSeries;
use super::validate::{validate_bars, EngineError};
use crate::config::StrategyConfig;
use crate::domain::{closes, Bar};
use crate::signals::inputs::columns;
use crate::signals::{compute_inputs, count_confirmations, normalize, SignalReading};

/// Compute indicators, sub-signals and composite readings for `bars`.
///
/// Empty input yields an empty frame. Bars with too little history carry
/// `None` values and a `SignalClass::None` reading.
pub fn calculate_signals(bars: &[Bar], config: &StrategyConfig) -> Result<SignalFrame, EngineError> {
    config.validate()?;
    if let Err(err) = validate_bars(bars) {
        warn!(error = %err, bars = bars.len(), "rejected bar series");
        return Err(err);
    }

    let settings = &config.settings;
    let indicators = IndicatorSeries::compute(&closes(bars), settings);
    let inputs = compute_inputs(bars, config, &indicators.rsi, &indicators.macd.histogram);

    let (sub_signals, readings): (Vec<_>, Vec<_>) = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let at = |s: &[Option<f64>]| s.get(i).copied().flatten();
            let sub = normalize(
                &inputs,
                i,
                at(&indicators.rsi),
                at(&indicators.ema_fast),
                at(&indicators.ema_mid),
                config,
            );
            let reading = SignalReading::new(
                sub.weighted_score(&config.weights),
                inputs.get(columns::PRICE_ROC_Z, i),
                count_confirmations(&inputs, i, settings),
                bar.close,
                settings,
            );
            (sub, reading)
        })
        .unzip();

    let frame = SignalFrame {
        bars: bars.to_vec(),
        indicators,
        inputs,
        sub_signals,
        readings,
        config_fingerprint: config.fingerprint(),
    };

    debug!(
        bars = frame.len(),
        warmup = config.warmup_bars(),
        signals = frame.signal_count(),
        "computed signal frame"
    );
    Ok(frame)
}
