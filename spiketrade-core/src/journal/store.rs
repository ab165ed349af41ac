//! Flat JSON file holding the whole journal.

use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{validate_trade, JournalError};
use crate::domain::{NewTrade, TradeRecord};

/// Single-user store: every write rewrites the file.
#[derive(Debug, Clone)]
pub struct JournalStore {
    path: PathBuf,
}

impl JournalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All recorded trades. A missing file is an empty journal.
    pub fn load(&self) -> Result<Vec<TradeRecord>, JournalError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "journal file missing, starting empty");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let trades: Vec<TradeRecord> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), trades = trades.len(), "loaded journal");
        Ok(trades)
    }

    /// Write all trades as pretty JSON. Writes go to a temp file that is then
    /// renamed over the journal.
    pub fn save(&self, trades: &[TradeRecord]) -> Result<(), JournalError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(trades)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            JournalError::Io(e)
        })?;
        Ok(())
    }

    /// Validate, record and persist a new trade. Ids are assigned as
    /// journal length + 1.
    pub fn append(
        &self,
        input: NewTrade,
        recorded_at: NaiveDateTime,
    ) -> Result<TradeRecord, JournalError> {
        validate_trade(&input)?;
        let mut trades = self.load()?;
        let record = TradeRecord::new(input, trades.len() as u64 + 1, recorded_at);
        trades.push(record.clone());
        self.save(&trades)?;
        info!(
            id = record.id,
            symbol = %record.symbol,
            pnl = record.pnl,
            "recorded trade"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TradeSide, TradeStatus};
    use chrono::NaiveDate;

    fn input(symbol: &str, exit: Option<f64>) -> NewTrade {
        let t = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        NewTrade {
            symbol: symbol.into(),
            side: TradeSide::Buy,
            status: if exit.is_some() {
                TradeStatus::Closed
            } else {
                TradeStatus::Open
            },
            entry_price: 1.0,
            exit_price: exit,
            entry_time: t,
            exit_time: None,
            notes: String::new(),
        }
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path().join("trades.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn append_assigns_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path().join("nested/trades.json"));
        let now = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap();

        let first = store.append(input("muln", Some(1.2)), now).unwrap();
        let second = store.append(input("ffie", None), now).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let loaded = store.load().unwrap();
        let ids: Vec<u64> = loaded.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(loaded[0].symbol, "MULN");
        assert_eq!(loaded[1].status, second.status);
        assert!((loaded[0].pnl - first.pnl).abs() < 1e-12);
    }

    #[test]
    fn invalid_trade_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path().join("trades.json"));
        let now = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap();
        assert!(store.append(input("", None), now).is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.json");
        fs::write(&path, "{not json").unwrap();
        let err = JournalStore::new(path).load().unwrap_err();
        assert!(matches!(err, JournalError::Json(_)));
    }
}
