//! US equity session for an exchange-local (US-Eastern) timestamp.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSession {
    PreMarket,
    Open,
    AfterHours,
    Closed,
}

impl MarketSession {
    /// Classify an exchange-local time. Holidays are not modelled.
    pub fn at(time: NaiveDateTime) -> Self {
        if matches!(time.weekday(), Weekday::Sat | Weekday::Sun) {
            return MarketSession::Closed;
        }
        let t = time.time();
        if t < hm(4, 0) {
            MarketSession::Closed
        } else if t < hm(9, 30) {
            MarketSession::PreMarket
        } else if t < hm(16, 0) {
            MarketSession::Open
        } else if t < hm(20, 0) {
            MarketSession::AfterHours
        } else {
            MarketSession::Closed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarketSession::PreMarket => "Pre-Market",
            MarketSession::Open => "Market Open",
            MarketSession::AfterHours => "After-Hours",
            MarketSession::Closed => "Market Closed",
        }
    }

    /// True in the pre-market and after-hours sessions.
    pub fn is_extended_hours(self) -> bool {
        matches!(self, MarketSession::PreMarket | MarketSession::AfterHours)
    }
}

/// Display label for `time`, naming weekends explicitly.
pub fn session_label(time: NaiveDateTime) -> &'static str {
    if matches!(time.weekday(), Weekday::Sat | Weekday::Sun) {
        "Weekend - Market Closed"
    } else {
        MarketSession::at(time).label()
    }
}

impl fmt::Display for MarketSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tuesday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn weekday_boundaries() {
        assert_eq!(MarketSession::at(tuesday(3, 59)), MarketSession::Closed);
        assert_eq!(MarketSession::at(tuesday(4, 0)), MarketSession::PreMarket);
        assert_eq!(MarketSession::at(tuesday(9, 29)), MarketSession::PreMarket);
        assert_eq!(MarketSession::at(tuesday(9, 30)), MarketSession::Open);
        assert_eq!(MarketSession::at(tuesday(15, 59)), MarketSession::Open);
        assert_eq!(MarketSession::at(tuesday(16, 0)), MarketSession::AfterHours);
        assert_eq!(MarketSession::at(tuesday(19, 59)), MarketSession::AfterHours);
        assert_eq!(MarketSession::at(tuesday(20, 0)), MarketSession::Closed);
    }

    #[test]
    fn weekend_is_closed() {
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();
        assert_eq!(MarketSession::at(saturday), MarketSession::Closed);
        assert_eq!(session_label(saturday), "Weekend - Market Closed");
        assert_eq!(session_label(tuesday(11, 0)), "Market Open");
    }

    #[test]
    fn extended_hours() {
        assert!(MarketSession::PreMarket.is_extended_hours());
        assert!(!MarketSession::Open.is_extended_hours());
        assert!(!MarketSession::Closed.is_extended_hours());
    }
}
