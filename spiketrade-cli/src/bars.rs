//! Bar CSV loading: `timestamp,open,high,low,close,volume`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;
use spiketrade_core::domain::Bar;

#[derive(Debug, Deserialize)]
struct CsvBar {
    #[serde(alias = "Datetime", alias = "datetime", alias = "Timestamp", alias = "time")]
    timestamp: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume")]
    volume: f64,
}

/// Parse an RFC 3339 timestamp (kept at its own offset's wall-clock time) or
/// a naive `%Y-%m-%d %H:%M[:%S]` / `%Y-%m-%dT%H:%M:%S` timestamp.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    bail!("unrecognized timestamp '{raw}'")
}

/// Load every row of a bar CSV. Ordering is checked later by the engine.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("open bar file {}", path.display()))?;

    let mut bars = Vec::new();
    for (row, record) in reader.deserialize::<CsvBar>().enumerate() {
        // header is line 1
        let line = row + 2;
        let record = record.with_context(|| format!("{}:{line}", path.display()))?;
        if !(record.volume.is_finite() && record.volume >= 0.0) {
            bail!("{}:{line}: invalid volume {}", path.display(), record.volume);
        }
        bars.push(Bar {
            timestamp: parse_timestamp(&record.timestamp)
                .with_context(|| format!("{}:{line}", path.display()))?,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume.round() as u64,
        });
    }
    Ok(bars)
}
