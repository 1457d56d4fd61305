// =============================================================================
// Shared Types — daily market data records
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading session for a single instrument.
///
/// The acquisition layer produces these in ascending date order with unique
/// dates. Calendar gaps (weekends, exchange holidays) are expected between
/// consecutive bars and carry no meaning downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Close adjusted for splits and dividends when the provider supplies
    /// one; falls back to the raw close otherwise.
    pub adj_close: f64,
    pub volume: u64,
}

#[cfg(test)]
impl DailyBar {
    /// Fixture: a flat bar whose every price field equals `close`.
    pub fn flat(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            adj_close: close,
            volume: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_fixture_mirrors_close() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let bar = DailyBar::flat(date, 11.0);
        assert_eq!(bar.open, 11.0);
        assert_eq!(bar.low, 11.0);
        assert_eq!(bar.adj_close, 11.0);
        assert_eq!(bar.volume, 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let bar = DailyBar {
            date,
            open: 10.0,
            high: 12.0,
            low: 9.5,
            close: 11.0,
            adj_close: 10.8,
            volume: 42_000,
        };
        let json = serde_json::to_string(&bar).unwrap();
        let back: DailyBar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bar);
    }
}
