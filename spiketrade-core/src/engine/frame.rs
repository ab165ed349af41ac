//! Engine output: the input bars augmented with every derived column.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::series::IndicatorSeries;
use super::snapshot::{day_change_pct, EmaTrend, MacdBias, MarketSnapshot, RsiZone};
use crate::components::indicator::IndicatorValues;
use crate::domain::Bar;
use crate::session::MarketSession;
use crate::signals::{SignalClass, SignalReading, SubSignals};

/// Every column is index-aligned with `bars`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalFrame {
    pub bars: Vec<Bar>,
    pub indicators: IndicatorSeries,
    /// Raw sub-signal inputs (z-scores, oscillator changes).
    pub inputs: IndicatorValues,
    pub sub_signals: Vec<SubSignals>,
    pub readings: Vec<SignalReading>,
    pub config_fingerprint: String,
}

/// One flat output row, for tabular rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedBar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub rsi: Option<f64>,
    pub ema_fast: Option<f64>,
    pub ema_mid: Option<f64>,
    pub ema_slow: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub score: Option<f64>,
    pub class: SignalClass,
    pub confirmations: u8,
    pub stop: Option<f64>,
    pub target: Option<f64>,
}

impl SignalFrame {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest_reading(&self) -> Option<&SignalReading> {
        self.readings.last()
    }

    /// Indices and readings of every signalled bar, oldest first.
    pub fn signals(&self) -> impl Iterator<Item = (usize, &SignalReading)> {
        self.readings
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_signal())
    }

    pub fn signal_count(&self) -> usize {
        self.signals().count()
    }

    pub fn row(&self, i: usize) -> Option<AugmentedBar> {
        let bar = self.bars.get(i)?;
        let reading = self.readings.get(i).copied().unwrap_or_default();
        let at = |s: &[Option<f64>]| s.get(i).copied().flatten();
        let ind = &self.indicators;
        Some(AugmentedBar {
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            rsi: at(&ind.rsi),
            ema_fast: at(&ind.ema_fast),
            ema_mid: at(&ind.ema_mid),
            ema_slow: at(&ind.ema_slow),
            macd: at(&ind.macd.macd),
            macd_signal: at(&ind.macd.signal),
            macd_histogram: at(&ind.macd.histogram),
            score: reading.score,
            class: reading.class,
            confirmations: reading.confirmations,
            stop: reading.levels.map(|l| l.stop),
            target: reading.levels.map(|l| l.target),
        })
    }

    pub fn rows(&self) -> Vec<AugmentedBar> {
        (0..self.len()).filter_map(|i| self.row(i)).collect()
    }

    /// Reading of the last bar, or `None` for an empty frame.
    pub fn snapshot(&self) -> Option<MarketSnapshot> {
        let last = self.len().checked_sub(1)?;
        let row = self.row(last)?;
        let first_open = self.bars.first()?.open;

        Some(MarketSnapshot {
            timestamp: row.timestamp,
            price: row.close,
            day_change_pct: day_change_pct(first_open, row.close),
            volume: row.volume,
            rsi: row.rsi,
            rsi_zone: row.rsi.map(RsiZone::of),
            macd_bias: row
                .macd
                .zip(row.macd_signal)
                .map(|(m, s)| MacdBias::of(m, s)),
            ema_trend: row.ema_fast.zip(row.ema_mid).map(|(f, m)| EmaTrend::of(f, m)),
            session: MarketSession::at(row.timestamp),
            reading: self.readings.get(last).copied().unwrap_or_default(),
        })
    }
}
