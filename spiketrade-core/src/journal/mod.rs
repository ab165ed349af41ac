//! Trade journal: manually recorded trades, their analytics, and a flat JSON
//! file store.

pub mod metrics;
pub mod store;

pub use metrics::PerformanceMetrics;
pub use store::JournalStore;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::{NewTrade, TradeRecord, TradeStatus};

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("journal JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid trade: {0}")]
    InvalidTrade(String),
}

/// Reject input that cannot produce a meaningful record.
pub fn validate_trade(input: &NewTrade) -> Result<(), JournalError> {
    if input.symbol.trim().is_empty() {
        return Err(JournalError::InvalidTrade("symbol is empty".into()));
    }
    if !(input.entry_price.is_finite() && input.entry_price > 0.0) {
        return Err(JournalError::InvalidTrade(format!(
            "entry price must be positive, got {}",
            input.entry_price
        )));
    }
    if let Some(exit) = input.exit_price {
        if !(exit.is_finite() && exit > 0.0) {
            return Err(JournalError::InvalidTrade(format!(
                "exit price must be positive, got {exit}"
            )));
        }
    }
    Ok(())
}

/// Selection over journal trades. Empty sets match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeFilter {
    pub symbols: Vec<String>,
    pub statuses: Vec<TradeStatus>,
    /// Only trades entered at or after this time.
    pub from: Option<NaiveDateTime>,
}

impl TradeFilter {
    pub fn matches(&self, trade: &TradeRecord) -> bool {
        let symbol_ok = self.symbols.is_empty()
            || self
                .symbols
                .iter()
                .any(|s| s.eq_ignore_ascii_case(&trade.symbol));
        let status_ok = self.statuses.is_empty() || self.statuses.contains(&trade.status);
        let from_ok = self.from.map_or(true, |from| trade.entry_time >= from);
        symbol_ok && status_ok && from_ok
    }

    /// Matching trades, newest entry first.
    pub fn apply<'a>(&self, trades: &'a [TradeRecord]) -> Vec<&'a TradeRecord> {
        let mut matched: Vec<&TradeRecord> = trades.iter().filter(|t| self.matches(t)).collect();
        matched.sort_by(|a, b| b.entry_time.cmp(&a.entry_time));
        matched
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredSummary {
    pub count: usize,
    pub total_pnl: f64,
    pub win_rate: f64,
}

pub fn filtered_summary(trades: &[&TradeRecord]) -> FilteredSummary {
    if trades.is_empty() {
        return FilteredSummary::default();
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    FilteredSummary {
        count: trades.len(),
        total_pnl: trades.iter().map(|t| t.pnl).sum(),
        win_rate: winners as f64 / trades.len() as f64 * 100.0,
    }
}

/// Running P&L total in entry-time order.
pub fn cumulative_pnl(trades: &[TradeRecord]) -> Vec<(NaiveDateTime, f64)> {
    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by_key(|t| t.entry_time);
    ordered
        .iter()
        .scan(0.0, |running, t| {
            *running += t.pnl;
            Some((t.entry_time, *running))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSummary {
    pub symbol: String,
    pub total_pnl: f64,
    pub trades: usize,
    pub avg_pnl: f64,
}

/// Per-symbol totals, sorted by symbol, P&L rounded to cents.
pub fn symbol_summary(trades: &[TradeRecord]) -> Vec<SymbolSummary> {
    let mut by_symbol: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for t in trades {
        let entry = by_symbol.entry(t.symbol.as_str()).or_default();
        entry.0 += t.pnl;
        entry.1 += 1;
    }
    by_symbol
        .into_iter()
        .map(|(symbol, (total, count))| SymbolSummary {
            symbol: symbol.to_string(),
            total_pnl: round_cents(total),
            trades: count,
            avg_pnl: round_cents(total / count as f64),
        })
        .collect()
}

/// The last `n` recorded trades, ordered newest entry first.
pub fn recent(trades: &[TradeRecord], n: usize) -> Vec<&TradeRecord> {
    let mut tail: Vec<&TradeRecord> = trades[trades.len().saturating_sub(n)..].iter().collect();
    tail.sort_by(|a, b| b.entry_time.cmp(&a.entry_time));
    tail
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Closed or open test trade entered `minute` minutes after 09:30 on 2024-03-04.
#[cfg(test)]
pub(crate) fn make_trade(
    id: u64,
    symbol: &str,
    entry: f64,
    exit: Option<f64>,
    status: TradeStatus,
    minute: i64,
) -> TradeRecord {
    use crate::domain::TradeSide;
    let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let entry_time = start + chrono::Duration::minutes(minute);
    TradeRecord::new(
        NewTrade {
            symbol: symbol.into(),
            side: TradeSide::Buy,
            status,
            entry_price: entry,
            exit_price: exit,
            entry_time,
            exit_time: exit.map(|_| entry_time + chrono::Duration::minutes(5)),
            notes: String::new(),
        },
        id,
        entry_time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeSide;

    fn book() -> Vec<TradeRecord> {
        vec![
            make_trade(1, "AAA", 1.00, Some(1.50), TradeStatus::Closed, 10),
            make_trade(2, "BBB", 2.00, Some(1.80), TradeStatus::Closed, 0),
            make_trade(3, "AAA", 1.00, Some(1.25), TradeStatus::Closed, 20),
            make_trade(4, "CCC", 3.00, None, TradeStatus::Open, 30),
        ]
    }

    #[test]
    fn filter_by_symbol_and_status() {
        let trades = book();
        let filter = TradeFilter {
            symbols: vec!["aaa".into()],
            statuses: vec![TradeStatus::Closed],
            from: None,
        };
        let matched = filter.apply(&trades);
        let ids: Vec<u64> = matched.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);

        let summary = filtered_summary(&matched);
        assert_eq!(summary.count, 2);
        assert!((summary.total_pnl - 0.75).abs() < 1e-9);
        assert_eq!(summary.win_rate, 100.0);
    }

    #[test]
    fn filter_from_time() {
        let trades = book();
        let filter = TradeFilter {
            from: Some(trades[2].entry_time),
            ..TradeFilter::default()
        };
        let ids: Vec<u64> = filter.apply(&trades).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 3]);
        assert_eq!(filtered_summary(&[]), FilteredSummary::default());
    }

    #[test]
    fn cumulative_in_entry_order() {
        let curve = cumulative_pnl(&book());
        let totals: Vec<f64> = curve.iter().map(|(_, v)| *v).collect();
        // BBB -0.2, AAA +0.5, AAA +0.25, CCC 0
        let expected = [-0.2, 0.3, 0.55, 0.55];
        for (got, want) in totals.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn summary_per_symbol() {
        let summary = symbol_summary(&book());
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].symbol, "AAA");
        assert_eq!(summary[0].trades, 2);
        assert_eq!(summary[0].total_pnl, 0.75);
        assert_eq!(summary[0].avg_pnl, 0.38);
        assert_eq!(summary[1].total_pnl, -0.2);
    }

    #[test]
    fn recent_newest_first() {
        let trades = book();
        let ids: Vec<u64> = recent(&trades, 2).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 3]);
        assert_eq!(recent(&trades, 10).len(), 4);
    }

    #[test]
    fn recent_takes_last_recorded_then_orders_by_entry() {
        let trades = vec![
            make_trade(1, "AAA", 1.0, Some(1.1), TradeStatus::Closed, 50),
            make_trade(2, "BBB", 1.0, Some(0.9), TradeStatus::Closed, 10),
            make_trade(3, "CCC", 1.0, None, TradeStatus::Open, 20),
        ];
        let ids: Vec<u64> = recent(&trades, 2).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert!(recent(&trades, 0).is_empty());
    }

    #[test]
    fn invalid_trades_rejected() {
        let base = NewTrade {
            symbol: "MULN".into(),
            side: TradeSide::Buy,
            status: TradeStatus::Open,
            entry_price: 1.0,
            exit_price: None,
            entry_time: book()[0].entry_time,
            exit_time: None,
            notes: String::new(),
        };
        assert!(validate_trade(&base).is_ok());

        let blank = NewTrade {
            symbol: "  ".into(),
            ..base.clone()
        };
        assert!(matches!(
            validate_trade(&blank),
            Err(JournalError::InvalidTrade(_))
        ));

        let free = NewTrade {
            entry_price: 0.0,
            ..base.clone()
        };
        assert!(validate_trade(&free).is_err());

        let bad_exit = NewTrade {
            exit_price: Some(f64::NAN),
            ..base
        };
        assert!(validate_trade(&bad_exit).is_err());
    }
}
