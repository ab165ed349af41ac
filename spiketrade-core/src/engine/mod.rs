//! Signal engine: validates a bar series, computes the core indicator columns
//! and sub-signal inputs, then scores and classifies every bar.
//!
//! The engine is stateless. Each call to [`calculate_signals`] owns its
//! output, so independent series can be processed on separate threads.

pub mod frame;
pub mod runner;
pub mod series;
pub mod snapshot;
pub mod validate;

pub use frame::{AugmentedBar, SignalFrame};
pub use runner::calculate_signals;
pub use series::IndicatorSeries;
pub use snapshot::{EmaTrend, MacdBias, MarketSnapshot, RsiZone};
pub use validate::{validate_bars, EngineError};
