//! Composite spike scoring.
//!
//! Each bar gets ten normalized sub-signals in [0, 1], a weighted score, and a
//! categorical class:
//!
//! | class            | condition                                                         |
//! |------------------|-------------------------------------------------------------------|
//! | `HighProbability`| score ≥ highProbThreshold                                         |
//! | `Spike`          | score ≥ comboSignalThreshold and price-ROC z ≥ spike threshold    |
//! | `Regular`        | score ≥ comboSignalThreshold                                      |
//! | `None`           | otherwise, or score missing                                       |

pub mod composite;
pub mod inputs;
pub mod subsignals;

pub use composite::{classify, count_confirmations, SignalReading, TradeLevels};
pub use inputs::{compute_inputs, columns};
pub use subsignals::{normalize, SubSignals};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical signal, ordered by strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalClass {
    #[default]
    None,
    Regular,
    Spike,
    HighProbability,
}

impl SignalClass {
    /// True for every class except `None`.
    pub fn is_signal(self) -> bool {
        self != SignalClass::None
    }
}

impl fmt::Display for SignalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalClass::None => "none",
            SignalClass::Regular => "regular",
            SignalClass::Spike => "spike",
            SignalClass::HighProbability => "high-probability",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_order_by_strength() {
        assert!(SignalClass::HighProbability > SignalClass::Spike);
        assert!(SignalClass::Spike > SignalClass::Regular);
        assert!(SignalClass::Regular > SignalClass::None);
        assert!(!SignalClass::None.is_signal());
        assert!(SignalClass::Regular.is_signal());
    }

    #[test]
    fn class_serializes_snake_case() {
        let json = serde_json::to_string(&SignalClass::HighProbability).unwrap();
        assert_eq!(json, "\"high_probability\"");
        assert_eq!(SignalClass::HighProbability.to_string(), "high-probability");
    }
}
