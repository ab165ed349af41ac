//! Domain types: market bars and journal trades.

pub mod bar;
pub mod trade;

pub use bar::{closes, volumes, Bar};
pub use trade::{NewTrade, TradeRecord, TradeSide, TradeStatus};
