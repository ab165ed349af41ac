//! Input checks run before any indicator is computed.

use thiserror::Error;
use tracing::warn;

use crate::config::ConfigError;
use crate::domain::Bar;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid bar at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Reject bars the indicators cannot be computed from: non-finite or negative
/// prices, and timestamps that do not strictly increase. Bars with an
/// inconsistent OHLC range are accepted but logged.
pub fn validate_bars(bars: &[Bar]) -> Result<(), EngineError> {
    let mut inconsistent = 0usize;
    for (index, bar) in bars.iter().enumerate() {
        let prices = [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ];
        for (field, value) in prices {
            if !value.is_finite() {
                return Err(invalid(index, format!("{field} is not finite ({value})")));
            }
            if value < 0.0 {
                return Err(invalid(index, format!("{field} is negative ({value})")));
            }
        }

        if let Some(prev) = index.checked_sub(1).map(|p| &bars[p]) {
            if bar.timestamp <= prev.timestamp {
                return Err(invalid(
                    index,
                    format!(
                        "timestamp {} does not follow {}",
                        bar.timestamp, prev.timestamp
                    ),
                ));
            }
        }

        if !bar.is_sane() {
            inconsistent += 1;
        }
    }
    if inconsistent > 0 {
        warn!(inconsistent, bars = bars.len(), "bars with inconsistent OHLC values");
    }
    Ok(())
}

fn invalid(index: usize, reason: String) -> EngineError {
    EngineError::InvalidInput { index, reason }
}
