use crate::error::{KpiError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month, keyed by its 3-letter abbreviation ("Jan" … "Dec").
///
/// Variant order is calendar order, so `Ord` and the `ALL` table both walk
/// January through December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn abbrev(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Look up a month by exact abbreviation. Matching is case-sensitive:
    /// "Jan" is a month, "jan" and "January" are not.
    pub fn from_abbrev(s: &str) -> Result<Month> {
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.abbrev() == s)
            .ok_or_else(|| KpiError::UnknownMonth(s.to_string()))
    }

    /// Zero-based position in the calendar year.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The preceding month within the same year; January has none.
    pub fn previous(self) -> Option<Month> {
        self.index().checked_sub(1).map(|i| Month::ALL[i])
    }

    /// January through `self`, inclusive.
    pub fn year_to_date(self) -> &'static [Month] {
        &Month::ALL[..=self.index()]
    }

    pub fn from_date(date: &NaiveDate) -> Month {
        // chrono guarantees 1..=12
        Month::ALL[date.month0() as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

impl FromStr for Month {
    type Err = KpiError;

    fn from_str(s: &str) -> Result<Self> {
        Month::from_abbrev(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbrev_round_trip_in_calendar_order() {
        let names: Vec<&str> = Month::ALL.iter().map(|m| m.abbrev()).collect();
        assert_eq!(
            names,
            ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
        assert_eq!(Month::from_abbrev("Sep").unwrap(), Month::Sep);
    }

    #[test]
    fn test_from_abbrev_is_case_sensitive() {
        assert!(matches!(Month::from_abbrev("jan"), Err(KpiError::UnknownMonth(_))));
        assert!(Month::from_abbrev("JAN").is_err());
        assert!(Month::from_abbrev("January").is_err());
        assert!(Month::from_abbrev("").is_err());
    }

    #[test]
    fn test_index() {
        assert_eq!(Month::Jan.index(), 0);
        assert_eq!(Month::Dec.index(), 11);
    }

    #[test]
    fn test_previous_and_year_to_date() {
        assert_eq!(Month::Jan.previous(), None);
        assert_eq!(Month::Mar.previous(), Some(Month::Feb));
        assert_eq!(Month::Mar.year_to_date(), &[Month::Jan, Month::Feb, Month::Mar]);
        assert_eq!(Month::Dec.year_to_date().len(), 12);
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(Month::from_date(&date), Month::Jun);
    }

    #[test]
    fn test_serde_uses_abbreviation() {
        assert_eq!(serde_json::to_string(&Month::Feb).unwrap(), "\"Feb\"");
        let m: Month = serde_json::from_str("\"Nov\"").unwrap();
        assert_eq!(m, Month::Nov);
    }
}
