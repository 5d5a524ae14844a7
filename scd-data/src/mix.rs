//! Revenue mix: how parts, labour and accessories split total revenue.

use crate::change::round_2dp;
use crate::cumulative::totals_through;
use crate::merge::YearPairRow;
use scd_kpi::{Category, Month};
use serde::{Deserialize, Serialize};

/// The span of months a figure covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    /// A single month.
    Month(Month),
    /// January through the given month.
    YearToDate(Month),
}

/// One slice of the revenue pie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueShare {
    pub category: Category,
    pub value: f64,
    /// Percentage of total revenue, two decimals. Zero when there is no revenue.
    pub share: f64,
}

fn current_value(rows: &[YearPairRow], category: Category, period: Period) -> f64 {
    match period {
        Period::Month(month) => rows
            .iter()
            .find(|row| row.month == month)
            .map(|row| row.current.value(category))
            .unwrap_or(0.0),
        Period::YearToDate(through) => totals_through(rows, category, through).0,
    }
}

/// Current-year revenue split for `period`, one entry per revenue component.
pub fn revenue_mix(rows: &[YearPairRow], period: Period) -> Vec<RevenueShare> {
    let values: Vec<(Category, f64)> = Category::REVENUE_COMPONENTS
        .iter()
        .map(|&category| (category, current_value(rows, category, period)))
        .collect();
    let total: f64 = values.iter().map(|(_, value)| value).sum();
    values
        .into_iter()
        .map(|(category, value)| RevenueShare {
            category,
            value,
            share: if total > 0.0 {
                round_2dp(value / total * 100.0)
            } else {
                0.0
            },
        })
        .collect()
}
