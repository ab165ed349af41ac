//! SpikeTrade Core: indicator engine, composite spike scoring, trade journal.
//!
//! This crate contains the computational core behind the signal viewer and
//! the trade journal:
//! - Domain types (bars, journal trades)
//! - Indicators over bar series (RSI, EMA, MACD, VWAP, OBV, MFI, %B, ...)
//! - Composite spike score with weighted, normalized sub-signals
//! - Strategy configuration with calibrated defaults
//! - Market snapshot and US equity session classification
//! - Journal analytics and a flat JSON store

pub mod components;
pub mod config;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod journal;
pub mod session;
pub mod signals;

pub use config::{ConfigError, SignalWeights, StrategyConfig, TradingSettings};
pub use engine::{calculate_signals, EngineError, SignalFrame};
