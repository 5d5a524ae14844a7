use crate::error::{KpiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tracked business metric.
///
/// The set is closed: every derived structure is produced once per category,
/// and the only coupling between categories is shared month alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Repair orders across both workshops
    Throughput,
    /// Mechanical repair orders
    MechRo,
    /// Body and paint repair orders
    BpRo,
    PartsRevenue,
    LabourRevenue,
    AccessoriesRevenue,
    /// Parts + labour + accessories
    TotalRevenue,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Throughput,
        Category::MechRo,
        Category::BpRo,
        Category::PartsRevenue,
        Category::LabourRevenue,
        Category::AccessoriesRevenue,
        Category::TotalRevenue,
    ];

    /// The categories that add up to `TotalRevenue`.
    pub const REVENUE_COMPONENTS: [Category; 3] = [
        Category::PartsRevenue,
        Category::LabourRevenue,
        Category::AccessoriesRevenue,
    ];

    /// Key used in data tables and JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Category::Throughput => "throughput",
            Category::MechRo => "mechRo",
            Category::BpRo => "bpRo",
            Category::PartsRevenue => "partsRevenue",
            Category::LabourRevenue => "labourRevenue",
            Category::AccessoriesRevenue => "accessoriesRevenue",
            Category::TotalRevenue => "totalRevenue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Throughput => "Throughput",
            Category::MechRo => "Mech RO",
            Category::BpRo => "BP RO",
            Category::PartsRevenue => "Parts",
            Category::LabourRevenue => "Labour",
            Category::AccessoriesRevenue => "Accessories",
            Category::TotalRevenue => "Total Revenue",
        }
    }

    /// Counts are shown as integers, revenue as currency.
    pub fn is_revenue(self) -> bool {
        matches!(
            self,
            Category::PartsRevenue
                | Category::LabourRevenue
                | Category::AccessoriesRevenue
                | Category::TotalRevenue
        )
    }

    pub fn from_key(s: &str) -> Result<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| KpiError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = KpiError;

    fn from_str(s: &str) -> Result<Self> {
        Category::from_key(s)
    }
}
