use crate::category::Category;
use crate::error::Result;
use csv::ReaderBuilder;
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Embedded per-category targets for the current year.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/targets.csv");

/// Caller-side target table. Values are opaque: nothing here validates or
/// derives them, and a category without an entry has a target of zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Targets(BTreeMap<Category, f64>);

#[derive(Debug, Deserialize)]
struct TargetRow {
    category: String,
    target: f64,
}

impl Targets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    /// Parse a `category,target` CSV string.
    pub fn from_csv(csv_object: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes());
        let mut targets = Targets::new();
        for row in rdr.deserialize::<TargetRow>() {
            let row = row?;
            let category = Category::from_key(&row.category)?;
            targets.0.insert(category, row.target);
        }
        Ok(targets)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading targets from {}", path.display());
        let csv_object = std::fs::read_to_string(path)?;
        Self::from_csv(&csv_object)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_csv(CSV_OBJECT)
    }
}
