//! Component traits shared by the indicator implementations and the engine.

pub mod indicator;

pub use indicator::{Indicator, IndicatorValues, Series};
