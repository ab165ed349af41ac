//! Aggregate performance of a set of journal trades.

use serde::{Deserialize, Serialize};

use crate::domain::TradeRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// All trades, open and closed.
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percent of the evaluated set with positive P&L.
    pub win_rate: f64,
    pub total_pnl: f64,
    pub avg_pnl: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub profit_factor: Option<f64>,
}

impl PerformanceMetrics {
    /// Metrics over the closed trades, or over every trade when none is
    /// closed yet. Empty input gives zeroed metrics.
    pub fn compute(trades: &[TradeRecord]) -> Self {
        if trades.is_empty() {
            return Self::default();
        }

        let closed: Vec<&TradeRecord> = trades.iter().filter(|t| t.is_closed()).collect();
        let evaluated: Vec<&TradeRecord> = if closed.is_empty() {
            trades.iter().collect()
        } else {
            closed
        };

        let count = evaluated.len();
        let winning_trades = evaluated.iter().filter(|t| t.is_winner()).count();
        let losing_trades = evaluated.iter().filter(|t| t.is_loser()).count();
        let total_pnl: f64 = evaluated.iter().map(|t| t.pnl).sum();
        let best_trade = evaluated
            .iter()
            .map(|t| t.pnl)
            .fold(f64::NEG_INFINITY, f64::max);
        let worst_trade = evaluated.iter().map(|t| t.pnl).fold(f64::INFINITY, f64::min);

        let profit_factor = (losing_trades > 0 && worst_trade != 0.0).then(|| {
            (best_trade * winning_trades as f64) / (worst_trade * losing_trades as f64).abs()
        });

        Self {
            total_trades: trades.len(),
            winning_trades,
            losing_trades,
            win_rate: winning_trades as f64 / count as f64 * 100.0,
            total_pnl,
            avg_pnl: total_pnl / count as f64,
            best_trade,
            worst_trade,
            profit_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeStatus;
    use crate::journal::make_trade as trade;

    #[test]
    fn empty_is_zeroed() {
        let m = PerformanceMetrics::compute(&[]);
        assert_eq!(m, PerformanceMetrics::default());
        assert!(m.profit_factor.is_none());
    }

    #[test]
    fn closed_trades_only() {
        let trades = vec![
            trade(1, "AAA", 1.00, Some(1.50), TradeStatus::Closed, 0),
            trade(2, "BBB", 2.00, Some(1.80), TradeStatus::Closed, 1),
            trade(3, "AAA", 1.00, Some(1.20), TradeStatus::Closed, 2),
            trade(4, "CCC", 3.00, None, TradeStatus::Open, 3),
        ];
        let m = PerformanceMetrics::compute(&trades);
        assert_eq!(m.total_trades, 4);
        assert_eq!(m.winning_trades, 2);
        assert_eq!(m.losing_trades, 1);
        assert!((m.win_rate - 200.0 / 3.0).abs() < 1e-9);
        assert!((m.total_pnl - 0.5).abs() < 1e-9);
        assert!((m.best_trade - 0.5).abs() < 1e-9);
        assert!((m.worst_trade + 0.2).abs() < 1e-9);
        // 0.5 * 2 / |-0.2 * 1|
        assert!((m.profit_factor.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_open_trades() {
        let trades = vec![
            trade(1, "AAA", 1.00, None, TradeStatus::Open, 0),
            trade(2, "BBB", 1.00, None, TradeStatus::Open, 1),
        ];
        let m = PerformanceMetrics::compute(&trades);
        assert_eq!(m.total_trades, 2);
        assert_eq!(m.winning_trades, 0);
        assert_eq!(m.win_rate, 0.0);
        assert!(m.profit_factor.is_none());
    }
}
