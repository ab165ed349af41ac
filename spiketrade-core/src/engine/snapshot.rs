//! Latest-bar market reading.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::session::MarketSession;
use crate::signals::SignalReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiZone {
    pub const OVERSOLD_BELOW: f64 = 30.0;
    pub const OVERBOUGHT_FROM: f64 = 70.0;

    pub fn of(rsi: f64) -> Self {
        if rsi < Self::OVERSOLD_BELOW {
            RsiZone::Oversold
        } else if rsi < Self::OVERBOUGHT_FROM {
            RsiZone::Neutral
        } else {
            RsiZone::Overbought
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdBias {
    Bullish,
    Bearish,
}

impl MacdBias {
    pub fn of(macd: f64, signal: f64) -> Self {
        if macd > signal {
            MacdBias::Bullish
        } else {
            MacdBias::Bearish
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmaTrend {
    Uptrend,
    Downtrend,
}

impl EmaTrend {
    pub fn of(fast: f64, mid: f64) -> Self {
        if fast > mid {
            EmaTrend::Uptrend
        } else {
            EmaTrend::Downtrend
        }
    }
}

macro_rules! display_as_debug {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        })*
    };
}

display_as_debug!(RsiZone, MacdBias, EmaTrend);

/// What the signal viewer shows for the most recent bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub timestamp: NaiveDateTime,
    pub price: f64,
    /// Percent change of the last close against the first bar's open.
    pub day_change_pct: Option<f64>,
    pub volume: u64,
    pub rsi: Option<f64>,
    pub rsi_zone: Option<RsiZone>,
    pub macd_bias: Option<MacdBias>,
    pub ema_trend: Option<EmaTrend>,
    pub session: MarketSession,
    pub reading: SignalReading,
}

/// Percent change from `open` to `price`; `None` when `open` is zero.
pub fn day_change_pct(open: f64, price: f64) -> Option<f64> {
    if open == 0.0 {
        return None;
    }
    Some((price - open) / open * 100.0)
}
