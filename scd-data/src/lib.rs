//! Period-comparison aggregation for service center KPIs.
//!
//! This crate turns raw monthly records into the Year-To-Date and
//! Month-To-Date comparison datasets the dashboard charts consume. Every
//! function is a pure transformation of its inputs; nothing here remembers
//! a selected metric, month or year.
//!
//! # Usage
//!
//! ```rust
//! use scd_data::{cumulative::cumulative_series, merge::merge_year_pair};
//! use scd_kpi::{Category, Month, MonthlyRawRecord};
//!
//! let mut jan = MonthlyRawRecord::zero(Month::Jan);
//! jan.mech_ro = 1280;
//! let mut jan_last_year = MonthlyRawRecord::zero(Month::Jan);
//! jan_last_year.mech_ro = 1520;
//!
//! let rows = merge_year_pair(&[jan], &[jan_last_year]);
//! assert_eq!(rows.len(), 12);
//!
//! let series = cumulative_series(&rows, Category::Throughput);
//! assert_eq!(series[11].current_cumulative, 1280.0);
//! assert_eq!(series[11].previous_cumulative, 1520.0);
//! ```

pub mod comparison;
pub mod mix;

/// Percentage change and target achievement.
pub mod change {
    /// Percentage change from `previous` to `current`, rounded to two decimals.
    ///
    /// When `previous` is zero there is no baseline: a positive `current`
    /// yields `None`, anything else yields `Some(0.0)`.
    pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
        if previous == 0.0 {
            return if current > 0.0 { None } else { Some(0.0) };
        }
        Some(round_2dp((current - previous) / previous * 100.0))
    }

    /// `actual` as a percentage of `target`, rounded to two decimals.
    /// A zero target has nothing to achieve against and yields `None`.
    pub fn achievement_percent(actual: f64, target: f64) -> Option<f64> {
        if target == 0.0 {
            return None;
        }
        Some(round_2dp(actual / target * 100.0))
    }

    pub fn round_2dp(value: f64) -> f64 {
        let rounded = (value * 100.0).round() / 100.0;
        // -0.0 prints as "-0.00"
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

}

/// Aligning two years of raw records on the calendar.
pub mod merge {
    use log::debug;
    use scd_kpi::{Month, MonthlyRawRecord, RecordSource};
    use serde::Serialize;

    /// The same calendar month from two different years.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct YearPairRow {
        pub month: Month,
        pub current: MonthlyRawRecord,
        pub previous: MonthlyRawRecord,
    }

    /// Find `month` in `records`, or the zero record when it is absent.
    /// The first matching entry wins.
    fn month_or_zero(records: &[MonthlyRawRecord], month: Month) -> MonthlyRawRecord {
        records
            .iter()
            .find(|r| r.month == month)
            .copied()
            .unwrap_or_else(|| MonthlyRawRecord::zero(month))
    }

    /// Merge two years of records into twelve rows, January through December.
    ///
    /// Inputs may be in any order and may cover any subset of months; a month
    /// absent from either side is filled with a zero record.
    pub fn merge_year_pair(
        current: &[MonthlyRawRecord],
        previous: &[MonthlyRawRecord],
    ) -> Vec<YearPairRow> {
        let missing = |records: &[MonthlyRawRecord]| {
            Month::ALL
                .iter()
                .filter(|m| !records.iter().any(|r| r.month == **m))
                .count()
        };
        debug!(
            "merge: substituting {} current and {} previous months with zero records",
            missing(current),
            missing(previous)
        );
        Month::ALL
            .iter()
            .map(|&month| YearPairRow {
                month,
                current: month_or_zero(current, month),
                previous: month_or_zero(previous, month),
            })
            .collect()
    }

    /// Twelve rows for two years of a [`RecordSource`], looked up month by
    /// month; same zero fill as [`merge_year_pair`].
    pub fn merge_years<S: RecordSource + ?Sized>(
        source: &S,
        current_year: i32,
        previous_year: i32,
    ) -> Vec<YearPairRow> {
        let lookup = |year: i32, month: Month| {
            source
                .record(year, month)
                .copied()
                .unwrap_or_else(|| MonthlyRawRecord::zero(month))
        };
        debug!(
            "merge: {} months for {}, {} for {}",
            source.year_records(current_year).len(),
            current_year,
            source.year_records(previous_year).len(),
            previous_year
        );
        Month::ALL
            .iter()
            .map(|&month| YearPairRow {
                month,
                current: lookup(current_year, month),
                previous: lookup(previous_year, month),
            })
            .collect()
    }

    /// The last calendar month with any non-zero figure, if there is one.
    pub fn latest_reported_month(records: &[MonthlyRawRecord]) -> Option<Month> {
        records
            .iter()
            .filter(|r| !r.is_zero())
            .map(|r| r.month)
            .max()
    }

}

/// Running totals for YTD charts.
pub mod cumulative {
    use crate::merge::YearPairRow;
    use scd_kpi::{Category, Month, MonthlyCumulativeValue};

    /// Running sums of `category`, one entry per row, computed independently
    /// for the current and previous year.
    pub fn cumulative_series(
        rows: &[YearPairRow],
        category: Category,
    ) -> Vec<MonthlyCumulativeValue> {
        rows.iter()
            .scan((0.0, 0.0), |(current, previous), row| {
                *current += row.current.value(category);
                *previous += row.previous.value(category);
                Some(MonthlyCumulativeValue {
                    month: row.month,
                    current_cumulative: *current,
                    previous_cumulative: *previous,
                })
            })
            .collect()
    }

    /// `(current, previous)` totals of `category` from January through `through`.
    pub fn totals_through(rows: &[YearPairRow], category: Category, through: Month) -> (f64, f64) {
        rows.iter()
            .filter(|row| row.month <= through)
            .fold((0.0, 0.0), |(current, previous), row| {
                (
                    current + row.current.value(category),
                    previous + row.previous.value(category),
                )
            })
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::merge::merge_year_pair;
        use scd_kpi::{MonthlyRawRecord, RecordSource, StaticTable};

        fn parts(month: Month, value: f64) -> MonthlyRawRecord {
            let mut record = MonthlyRawRecord::zero(month);
            record.mech_parts = value;
            record
        }

        #[test]
        fn test_throughput_first_two_months() {
            let mut jan = MonthlyRawRecord::zero(Month::Jan);
            jan.mech_ro = 1280;
            let mut feb = MonthlyRawRecord::zero(Month::Feb);
            feb.mech_ro = 1284;
            let mut jan_prev = MonthlyRawRecord::zero(Month::Jan);
            jan_prev.mech_ro = 1520;
            let mut feb_prev = MonthlyRawRecord::zero(Month::Feb);
            feb_prev.mech_ro = 1497;

            let rows = merge_year_pair(&[feb, jan], &[jan_prev, feb_prev]);
            let series = cumulative_series(&rows, Category::Throughput);

            assert_eq!(series[0].current_cumulative, 1280.0);
            assert_eq!(series[0].previous_cumulative, 1520.0);
            assert_eq!(series[1].month, Month::Feb);
            assert_eq!(series[1].current_cumulative, 2564.0);
            assert_eq!(series[1].previous_cumulative, 3017.0);
            // nothing after February: totals stay flat
            assert_eq!(series[11].current_cumulative, 2564.0);
        }

        #[test]
        fn test_monotonic_and_sums_to_year_total() {
            let table = StaticTable::embedded().unwrap();
            let rows = merge_year_pair(table.year_records(2025), table.year_records(2024));
            for category in Category::ALL {
                let series = cumulative_series(&rows, category);
                assert_eq!(series.len(), 12);
                for pair in series.windows(2) {
                    assert!(pair[1].current_cumulative >= pair[0].current_cumulative);
                    assert!(pair[1].previous_cumulative >= pair[0].previous_cumulative);
                }
                let year_total: f64 = table
                    .year_records(2024)
                    .iter()
                    .map(|r| r.value(category))
                    .sum();
                assert!((series[11].previous_cumulative - year_total).abs() < 1e-3);
            }
        }

        #[test]
        fn test_recurrence() {
            let current: Vec<_> = Month::ALL
                .iter()
                .map(|&m| parts(m, (m.index() + 1) as f64 * 10.0))
                .collect();
            let rows = merge_year_pair(&current, &[]);
            let series = cumulative_series(&rows, Category::PartsRevenue);
            assert_eq!(series[0].current_cumulative, rows[0].current.value(Category::PartsRevenue));
            for i in 1..12 {
                assert_eq!(
                    series[i].current_cumulative,
                    series[i - 1].current_cumulative + rows[i].current.value(Category::PartsRevenue)
                );
            }
            assert_eq!(series[11].current_cumulative, 780.0);
        }

        #[test]
        fn test_idempotent() {
            let table = StaticTable::embedded().unwrap();
            let rows = merge_year_pair(table.year_records(2025), table.year_records(2024));
            let first = cumulative_series(&rows, Category::TotalRevenue);
            let second = cumulative_series(&rows, Category::TotalRevenue);
            assert_eq!(first, second);
            for (a, b) in first.iter().zip(&second) {
                assert_eq!(a.current_cumulative.to_bits(), b.current_cumulative.to_bits());
                assert_eq!(a.previous_cumulative.to_bits(), b.previous_cumulative.to_bits());
            }
        }

        #[test]
        fn test_empty_rows() {
            assert!(cumulative_series(&[], Category::Throughput).is_empty());
            assert_eq!(totals_through(&[], Category::Throughput, Month::Dec), (0.0, 0.0));
        }

        #[test]
        fn test_totals_through_matches_series() {
            let table = StaticTable::embedded().unwrap();
            let rows = merge_year_pair(table.year_records(2025), table.year_records(2024));
            let series = cumulative_series(&rows, Category::Throughput);
            let (current, previous) = totals_through(&rows, Category::Throughput, Month::Jun);
            assert_eq!(current, series[5].current_cumulative);
            assert_eq!(previous, series[5].previous_cumulative);
            assert_eq!(current, 6712.0);
            assert_eq!(previous, 9727.0);
        }
    }
}
