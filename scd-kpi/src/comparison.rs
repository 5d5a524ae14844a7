//! Value objects handed to chart and table renderers.
//!
//! Field names serialize in camelCase so the JSON matches what the
//! dashboard charts bind to.

use crate::month::Month;
use serde::{Deserialize, Serialize};

/// Current vs previous vs target for one category in one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetricValues {
    pub current: f64,
    pub previous: f64,
    /// Supplied by the caller's target table, passed through untouched.
    pub target: f64,
    /// `None` when there is no baseline to compare against
    /// (previous is zero and current is positive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<f64>,
}

/// Running totals from January through `month`, for two years in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCumulativeValue {
    pub month: Month,
    pub current_cumulative: f64,
    pub previous_cumulative: f64,
}
