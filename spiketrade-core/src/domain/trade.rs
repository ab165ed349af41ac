//! TradeRecord: one manually recorded journal entry.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction recorded for the trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Whether the position has been exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "OPEN"),
            TradeStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

/// User input for a new journal entry, before P&L is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub symbol: String,
    pub side: TradeSide,
    pub status: TradeStatus,
    pub entry_price: f64,
    pub exit_price: Option<f64>,
    pub entry_time: NaiveDateTime,
    pub exit_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: String,
}

/// A persisted journal entry with derived P&L.
///
/// P&L is per share and always `exit - entry`, regardless of side. A trade
/// without an exit price carries zero P&L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: u64,
    pub symbol: String,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub status: TradeStatus,
    pub entry_price: f64,
    pub exit_price: Option<f64>,
    pub entry_time: NaiveDateTime,
    pub exit_time: Option<NaiveDateTime>,
    pub pnl: f64,
    pub pnl_percent: f64,
    #[serde(default)]
    pub notes: String,
    pub recorded_at: NaiveDateTime,
}

impl TradeRecord {
    /// Build a record from user input, deriving P&L and normalizing the symbol.
    pub fn new(input: NewTrade, id: u64, recorded_at: NaiveDateTime) -> Self {
        let pnl = input.exit_price.map_or(0.0, |exit| exit - input.entry_price);
        let pnl_percent = if input.entry_price != 0.0 {
            pnl / input.entry_price * 100.0
        } else {
            0.0
        };
        Self {
            id,
            symbol: input.symbol.trim().to_uppercase(),
            side: input.side,
            status: input.status,
            entry_price: input.entry_price,
            exit_price: input.exit_price,
            entry_time: input.entry_time,
            exit_time: input.exit_time,
            pnl,
            pnl_percent,
            notes: input.notes,
            recorded_at,
        }
    }

    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }

    pub fn is_loser(&self) -> bool {
        self.pnl < 0.0
    }

    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn sample_input() -> NewTrade {
        NewTrade {
            symbol: " muln ".into(),
            side: TradeSide::Buy,
            status: TradeStatus::Closed,
            entry_price: 2.00,
            exit_price: Some(2.50),
            entry_time: at(9, 45),
            exit_time: Some(at(10, 15)),
            notes: "gap and go".into(),
        }
    }

    #[test]
    fn new_derives_pnl_and_percent() {
        let t = TradeRecord::new(sample_input(), 1, at(16, 0));
        assert_eq!(t.symbol, "MULN");
        assert!((t.pnl - 0.5).abs() < 1e-12);
        assert!((t.pnl_percent - 25.0).abs() < 1e-12);
        assert!(t.is_winner());
        assert!(t.is_closed());
    }

    #[test]
    fn missing_exit_has_zero_pnl() {
        let mut input = sample_input();
        input.exit_price = None;
        input.status = TradeStatus::Open;
        let t = TradeRecord::new(input, 2, at(16, 0));
        assert_eq!(t.pnl, 0.0);
        assert_eq!(t.pnl_percent, 0.0);
        assert!(!t.is_winner() && !t.is_loser());
    }

    #[test]
    fn serializes_side_as_type() {
        let t = TradeRecord::new(sample_input(), 1, at(16, 0));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "BUY");
        assert_eq!(json["status"], "CLOSED");
    }
}
