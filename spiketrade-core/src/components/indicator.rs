//! Indicator trait and precomputed indicator values container.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! Every output series is index-aligned with the input bars; an index without
//! enough history holds `None` instead of a fabricated number.

use crate::domain::Bar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A derived column: one optional value per input bar.
pub type Series = Vec<Option<f64>>;

/// Trait for bar-series indicators.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
pub trait Indicator: Send + Sync {
    /// Column name (e.g., "rsi_14", "ema_9").
    fn name(&self) -> &str;

    /// Number of leading bars that are always `None`.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Series` of the same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Series;
}

/// Container for named indicator columns.
///
/// `BTreeMap` keeps column order stable for rendering and serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorValues {
    series: BTreeMap<String, Series>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Series) {
        self.series.insert(name.into(), values);
    }

    /// Value of a column at a bar index. `None` covers unknown columns,
    /// out-of-range indices, and missing values alike.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied().flatten())
    }

    /// Get the full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Column names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|k| k.as_str())
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
