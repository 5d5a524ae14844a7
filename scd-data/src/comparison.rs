//! Current vs previous vs target records for MTD and YTD charts.

use crate::change::percent_change;
use crate::cumulative::{cumulative_series, totals_through};
use crate::merge::YearPairRow;
use log::debug;
use scd_kpi::{
    Category, ComparisonMetricValues, Month, MonthlyCumulativeValue, MonthlyRawRecord, Targets,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Every category's comparison for one month.
pub type MtdKpiSet = BTreeMap<Category, ComparisonMetricValues>;

/// YTD summary for one category plus its month-by-month running totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YtdKpiSet {
    pub summary: ComparisonMetricValues,
    pub monthly_breakdown: Vec<MonthlyCumulativeValue>,
}

/// Build a comparison record. `target` is passed through as given.
pub fn comparison_record(current: f64, previous: f64, target: f64) -> ComparisonMetricValues {
    ComparisonMetricValues {
        current,
        previous,
        target,
        percent_change: percent_change(current, previous),
    }
}

fn row_for(rows: &[YearPairRow], month: Month) -> YearPairRow {
    rows.iter()
        .find(|row| row.month == month)
        .copied()
        .unwrap_or(YearPairRow {
            month,
            current: MonthlyRawRecord::zero(month),
            previous: MonthlyRawRecord::zero(month),
        })
}

fn compare_records(
    current: &MonthlyRawRecord,
    previous: &MonthlyRawRecord,
    targets: &Targets,
) -> MtdKpiSet {
    Category::ALL
        .iter()
        .map(|&category| {
            let record = comparison_record(
                current.value(category),
                previous.value(category),
                targets.get(category),
            );
            (category, record)
        })
        .collect()
}

/// `month` this year against the same month last year.
pub fn mtd_comparison(rows: &[YearPairRow], month: Month, targets: &Targets) -> MtdKpiSet {
    let row = row_for(rows, month);
    compare_records(&row.current, &row.previous, targets)
}

/// `month` this year against the month before it. January is compared with
/// last year's December.
pub fn month_over_month(rows: &[YearPairRow], month: Month, targets: &Targets) -> MtdKpiSet {
    let row = row_for(rows, month);
    let baseline = match month.previous() {
        Some(previous_month) => row_for(rows, previous_month).current,
        None => row_for(rows, Month::Dec).previous,
    };
    compare_records(&row.current, &baseline, targets)
}

/// YTD summary through `through` (both years summed over the same months)
/// and the full twelve-month cumulative breakdown for `category`.
pub fn ytd_kpi_set(
    rows: &[YearPairRow],
    category: Category,
    through: Month,
    target: f64,
) -> YtdKpiSet {
    let (current, previous) = totals_through(rows, category, through);
    YtdKpiSet {
        summary: comparison_record(current, previous, target),
        monthly_breakdown: cumulative_series(rows, category),
    }
}

/// The YTD and MTD datasets for every category, through one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TillDateComparison {
    pub through: Month,
    pub ytd: BTreeMap<Category, YtdKpiSet>,
    /// One entry per month from January through `through`.
    pub mtd: BTreeMap<Month, MtdKpiSet>,
}

impl TillDateComparison {
    pub fn build(rows: &[YearPairRow], through: Month, targets: &Targets) -> Self {
        debug!("comparison: building till-date datasets through {}", through);
        let ytd = Category::ALL
            .iter()
            .map(|&category| {
                (
                    category,
                    ytd_kpi_set(rows, category, through, targets.get(category)),
                )
            })
            .collect();
        let mtd = through
            .year_to_date()
            .iter()
            .map(|&month| (month, mtd_comparison(rows, month, targets)))
            .collect();
        Self { through, ytd, mtd }
    }

    pub fn ytd(&self, category: Category) -> Option<&YtdKpiSet> {
        self.ytd.get(&category)
    }

    pub fn mtd(&self, month: Month, category: Category) -> Option<&ComparisonMetricValues> {
        self.mtd.get(&month).and_then(|set| set.get(&category))
    }
}
