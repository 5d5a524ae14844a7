use crate::error::Result;
use crate::month::Month;
use crate::record::{parse_records_csv, MonthlyRawRecord};
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::Path;

/// Embedded monthly records for every year the dashboard ships with.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/monthly_records.csv");

/// Lookup of raw monthly records by year and month.
///
/// Aggregation only sees this trait, so it can run against the embedded
/// tables, a file the user points at, or a handful of records in a test.
pub trait RecordSource {
    /// All records supplied for `year`, in source order. Unknown years are empty.
    fn year_records(&self, year: i32) -> &[MonthlyRawRecord];

    /// Years with at least one record, ascending.
    fn years(&self) -> Vec<i32>;

    /// First record for `month` in `year`, if any.
    fn record(&self, year: i32, month: Month) -> Option<&MonthlyRawRecord> {
        self.year_records(year).iter().find(|r| r.month == month)
    }
}

/// In-memory table of records grouped by year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticTable {
    years: BTreeMap<i32, Vec<MonthlyRawRecord>>,
}

impl StaticTable {
    /// Group `(year, record)` pairs by year, keeping source order within a year.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (i32, MonthlyRawRecord)>,
    {
        let mut years: BTreeMap<i32, Vec<MonthlyRawRecord>> = BTreeMap::new();
        for (year, record) in records {
            years.entry(year).or_default().push(record);
        }
        Self { years }
    }

    pub fn from_csv(csv_object: &str) -> Result<Self> {
        let table = Self::from_records(parse_records_csv(csv_object)?);
        for (year, records) in &table.years {
            debug!("records: {} months loaded for {}", records.len(), year);
        }
        Ok(table)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading monthly records from {}", path.display());
        let csv_object = std::fs::read_to_string(path)?;
        Self::from_csv(&csv_object)
    }

    /// The tables compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_csv(CSV_OBJECT)
    }
}

impl RecordSource for StaticTable {
    fn year_records(&self, year: i32) -> &[MonthlyRawRecord] {
        self.years.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    #[test]
    fn test_embedded_table_loads() {
        let table = StaticTable::embedded().unwrap();
        assert_eq!(table.years(), vec![2024, 2025]);
        assert_eq!(table.year_records(2024).len(), 12);
        assert_eq!(table.year_records(2025).len(), 6);
    }

    #[test]
    fn test_embedded_table_matches_dashboard_figures() {
        let table = StaticTable::embedded().unwrap();
        let jan_2024 = table.record(2024, Month::Jan).unwrap();
        let jan_2025 = table.record(2025, Month::Jan).unwrap();
        assert_eq!(jan_2024.value(Category::Throughput), 1520.0);
        assert_eq!(jan_2025.value(Category::Throughput), 1280.0);
        assert!(table.record(2025, Month::Jul).is_none());
    }

    #[test]
    fn test_unknown_year_is_empty() {
        let table = StaticTable::embedded().unwrap();
        assert!(table.year_records(1999).is_empty());
        assert!(table.record(1999, Month::Jan).is_none());
    }

    #[test]
    fn test_record_returns_first_match() {
        let mut first = MonthlyRawRecord::zero(Month::Mar);
        first.mech_ro = 1;
        let mut second = MonthlyRawRecord::zero(Month::Mar);
        second.mech_ro = 2;
        let table = StaticTable::from_records(vec![(2024, first), (2024, second)]);
        assert_eq!(table.record(2024, Month::Mar).unwrap().mech_ro, 1);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = StaticTable::from_path("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, crate::error::KpiError::Io(_)));
    }
}
