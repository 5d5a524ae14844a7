//! Resolve the command-line data selection into aligned year-pair rows.

use crate::DataOptions;
use anyhow::anyhow;
use log::{info, warn};
use scd_data::merge::{latest_reported_month, merge_years, YearPairRow};
use scd_kpi::{Month, RecordSource, StaticTable, Targets};
use scd_utils::dates::reporting_month;

/// Everything a report needs: two aligned years, the month being reported
/// on, and the target table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub current_year: i32,
    pub previous_year: i32,
    pub month: Month,
    pub rows: Vec<YearPairRow>,
    pub targets: Targets,
}

/// Load the records and targets named by `options`, falling back to the
/// embedded tables.
pub fn load(options: &DataOptions) -> anyhow::Result<Dataset> {
    let source = match &options.records {
        Some(path) => StaticTable::from_path(path)?,
        None => StaticTable::embedded()?,
    };
    let targets = match &options.targets {
        Some(path) => Targets::from_path(path)?,
        None => Targets::embedded()?,
    };
    load_from(&source, targets, options)
}

/// Pick the years and month to compare from `source`.
///
/// Explicit options win; an `--as-of` date supplies both year and month;
/// otherwise the latest year in the source and its latest month with
/// figures are used.
pub fn load_from<S: RecordSource>(
    source: &S,
    targets: Targets,
    options: &DataOptions,
) -> anyhow::Result<Dataset> {
    let as_of = options
        .as_of
        .as_deref()
        .map(reporting_month)
        .transpose()?;

    let current_year = match (options.current_year, as_of) {
        (Some(year), _) => year,
        (None, Some((year, _))) => year,
        (None, None) => source
            .years()
            .last()
            .copied()
            .ok_or_else(|| anyhow!("No monthly records loaded"))?,
    };
    let previous_year = options.previous_year.unwrap_or(current_year - 1);

    for year in [current_year, previous_year] {
        if source.year_records(year).is_empty() {
            warn!("No records for {}; every month reads as zero", year);
        }
    }

    let month = match (options.month, as_of) {
        (Some(month), _) => month,
        (None, Some((_, month))) => month,
        (None, None) => latest_reported_month(source.year_records(current_year)).ok_or_else(
            || anyhow!("No figures reported for {current_year}; pass --month or --as-of"),
        )?,
    };

    info!(
        "Comparing {} against {} through {}",
        current_year, previous_year, month
    );

    Ok(Dataset {
        current_year,
        previous_year,
        month,
        rows: merge_years(source, current_year, previous_year),
        targets,
    })
}
