use crate::category::Category;
use crate::error::{KpiError, Result};
use crate::month::Month;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// One calendar month's source facts for one year.
///
/// Repair-order counts and revenue are split by workshop: mechanical
/// (`mech_*`) and body and paint (`bp_*`). Categories combine them, see
/// [`MonthlyRawRecord::value`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRawRecord {
    pub month: Month,
    pub mech_ro: u32,
    pub bp_ro: u32,
    pub mech_parts: f64,
    pub bp_parts: f64,
    pub mech_labour: f64,
    pub bp_labour: f64,
    pub mech_accessories: f64,
    pub bp_accessories: f64,
}

impl MonthlyRawRecord {
    /// The record substituted for a month with no source data.
    pub fn zero(month: Month) -> Self {
        Self {
            month,
            mech_ro: 0,
            bp_ro: 0,
            mech_parts: 0.0,
            bp_parts: 0.0,
            mech_labour: 0.0,
            bp_labour: 0.0,
            mech_accessories: 0.0,
            bp_accessories: 0.0,
        }
    }

    /// Total for one category in this month.
    pub fn value(&self, category: Category) -> f64 {
        match category {
            Category::Throughput => f64::from(self.mech_ro) + f64::from(self.bp_ro),
            Category::MechRo => f64::from(self.mech_ro),
            Category::BpRo => f64::from(self.bp_ro),
            Category::PartsRevenue => self.mech_parts + self.bp_parts,
            Category::LabourRevenue => self.mech_labour + self.bp_labour,
            Category::AccessoriesRevenue => self.mech_accessories + self.bp_accessories,
            Category::TotalRevenue => Category::REVENUE_COMPONENTS
                .iter()
                .map(|c| self.value(*c))
                .sum(),
        }
    }

    /// True when every count and revenue field is zero.
    pub fn is_zero(&self) -> bool {
        *self == MonthlyRawRecord::zero(self.month)
    }
}

/// One row of a monthly records table.
///
/// Expected CSV columns (with headers):
/// `year,month,mech_ro,bp_ro,mech_parts,bp_parts,mech_labour,bp_labour,`
/// `mech_accessories,bp_accessories`
///
/// Empty or missing value columns read as zero.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordRow {
    pub year: i32,
    pub month: String,
    #[serde(default)]
    pub mech_ro: Option<u32>,
    #[serde(default)]
    pub bp_ro: Option<u32>,
    #[serde(default)]
    pub mech_parts: Option<f64>,
    #[serde(default)]
    pub bp_parts: Option<f64>,
    #[serde(default)]
    pub mech_labour: Option<f64>,
    #[serde(default)]
    pub bp_labour: Option<f64>,
    #[serde(default)]
    pub mech_accessories: Option<f64>,
    #[serde(default)]
    pub bp_accessories: Option<f64>,
}

impl TryFrom<RecordRow> for (i32, MonthlyRawRecord) {
    type Error = KpiError;

    fn try_from(row: RecordRow) -> Result<Self> {
        let month = Month::from_abbrev(row.month.trim())?;
        let year = row.year;
        let revenue = |field: &'static str, value: Option<f64>| -> Result<f64> {
            let value = value.unwrap_or(0.0);
            if !value.is_finite() || value < 0.0 {
                return Err(KpiError::InvalidValue {
                    field,
                    month,
                    year,
                    value,
                });
            }
            Ok(value)
        };
        let record = MonthlyRawRecord {
            month,
            mech_ro: row.mech_ro.unwrap_or(0),
            bp_ro: row.bp_ro.unwrap_or(0),
            mech_parts: revenue("mech_parts", row.mech_parts)?,
            bp_parts: revenue("bp_parts", row.bp_parts)?,
            mech_labour: revenue("mech_labour", row.mech_labour)?,
            bp_labour: revenue("bp_labour", row.bp_labour)?,
            mech_accessories: revenue("mech_accessories", row.mech_accessories)?,
            bp_accessories: revenue("bp_accessories", row.bp_accessories)?,
        };
        Ok((year, record))
    }
}

/// Parse a monthly records CSV string into `(year, record)` pairs, in file order.
pub fn parse_records_csv(csv_object: &str) -> Result<Vec<(i32, MonthlyRawRecord)>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_object.as_bytes());
    let mut records: Vec<(i32, MonthlyRawRecord)> = Vec::new();
    for row in rdr.deserialize::<RecordRow>() {
        let record: (i32, MonthlyRawRecord) = row?.try_into()?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "year,month,mech_ro,bp_ro,mech_parts,bp_parts,\
                          mech_labour,bp_labour,mech_accessories,bp_accessories\n";

    fn sample() -> MonthlyRawRecord {
        MonthlyRawRecord {
            month: Month::Jan,
            mech_ro: 1134,
            bp_ro: 146,
            mech_parts: 100.0,
            bp_parts: 50.0,
            mech_labour: 30.0,
            bp_labour: 20.0,
            mech_accessories: 7.5,
            bp_accessories: 2.5,
        }
    }

    #[test]
    fn test_category_values() {
        let record = sample();
        assert_eq!(record.value(Category::Throughput), 1280.0);
        assert_eq!(record.value(Category::MechRo), 1134.0);
        assert_eq!(record.value(Category::BpRo), 146.0);
        assert_eq!(record.value(Category::PartsRevenue), 150.0);
        assert_eq!(record.value(Category::LabourRevenue), 50.0);
        assert_eq!(record.value(Category::AccessoriesRevenue), 10.0);
        assert_eq!(record.value(Category::TotalRevenue), 210.0);
    }

    #[test]
    fn test_zero_record() {
        let zero = MonthlyRawRecord::zero(Month::Jul);
        assert!(zero.is_zero());
        assert!(Category::ALL.iter().all(|c| zero.value(*c) == 0.0));
        assert!(!sample().is_zero());
    }

    #[test]
    fn test_parse_records_csv() {
        let csv_data = format!(
            "{HEADER}\
             2025,Feb,1124,160,6841547.65,6430476.1,3054913.0,2733546.91,631010.05,13392.53\n\
             2024,Jan,1332,188,9221303.58,7446075.89,3257269.01,3113276.39,305566.87,32888.89\n"
        );
        let records = parse_records_csv(&csv_data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 2025);
        assert_eq!(records[0].1.month, Month::Feb);
        assert_eq!(records[0].1.value(Category::Throughput), 1284.0);
        assert_eq!(records[1].0, 2024);
        assert_eq!(records[1].1.value(Category::Throughput), 1520.0);
    }

    #[test]
    fn test_parse_empty_fields_as_zero() {
        let csv_data = format!("{HEADER}2025,Jun,283,,1963615.73,,,,,\n");
        let records = parse_records_csv(&csv_data).unwrap();
        let record = records[0].1;
        assert_eq!(record.bp_ro, 0);
        assert_eq!(record.bp_parts, 0.0);
        assert_eq!(record.value(Category::PartsRevenue), 1963615.73);
        assert_eq!(record.value(Category::LabourRevenue), 0.0);
    }

    #[test]
    fn test_parse_missing_columns_as_zero() {
        let csv_data = "year,month,mech_ro\n2024,Mar,10\n";
        let records = parse_records_csv(csv_data).unwrap();
        assert_eq!(records[0].1.value(Category::Throughput), 10.0);
        assert_eq!(records[0].1.value(Category::TotalRevenue), 0.0);
    }

    #[test]
    fn test_parse_rejects_unknown_month() {
        let csv_data = format!("{HEADER}2025,jan,1,1,1,1,1,1,1,1\n");
        let err = parse_records_csv(&csv_data).unwrap_err();
        assert!(matches!(err, KpiError::UnknownMonth(ref m) if m == "jan"));
    }

    #[test]
    fn test_parse_rejects_negative_revenue() {
        let csv_data = format!("{HEADER}2025,Jan,1,1,-5,1,1,1,1,1\n");
        let err = parse_records_csv(&csv_data).unwrap_err();
        assert!(matches!(
            err,
            KpiError::InvalidValue { field: "mech_parts", month: Month::Jan, year: 2025, .. }
        ));
    }

    #[test]
    fn test_parse_rejects_non_finite_revenue() {
        let err = parse_records_csv("year,month,mech_parts\n2025,Jan,NaN\n").unwrap_err();
        assert!(matches!(
            err,
            KpiError::InvalidValue { field: "mech_parts", month: Month::Jan, year: 2025, .. }
        ));

        let err = parse_records_csv("year,month,bp_labour\n2025,Feb,inf\n").unwrap_err();
        assert!(matches!(
            err,
            KpiError::InvalidValue { field: "bp_labour", month: Month::Feb, .. }
        ));

        assert!(parse_records_csv("year,month,bp_accessories\n2024,Mar,-inf\n").is_err());
    }

    #[test]
    fn test_parse_header_only() {
        let records = parse_records_csv(HEADER).unwrap();
        assert!(records.is_empty());
    }
}
