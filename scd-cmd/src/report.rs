//! Render the comparison datasets as tables, JSON or CSV.

use crate::load::Dataset;
use crate::OutputFormat;
use scd_data::change::achievement_percent;
use scd_data::comparison::{self, mtd_comparison, MtdKpiSet, TillDateComparison};
use scd_data::cumulative::cumulative_series;
use scd_data::mix::{revenue_mix, Period, RevenueShare};
use scd_kpi::{Category, ComparisonMetricValues, Month, MonthlyCumulativeValue};
use scd_utils::format::{format_change, format_currency, format_value};
use serde::Serialize;
use std::io::Write;

/// One comparison record flattened for CSV and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub category: Category,
    pub current: f64,
    pub previous: f64,
    pub target: f64,
    pub percent_change: Option<f64>,
    /// Current as a percentage of target.
    pub achievement: Option<f64>,
}

impl ComparisonRow {
    fn new(category: Category, values: &ComparisonMetricValues) -> Self {
        Self {
            category,
            current: values.current,
            previous: values.previous,
            target: values.target,
            percent_change: values.percent_change,
            achievement: achievement_percent(values.current, values.target),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonReport<'a> {
    title: &'a str,
    rows: &'a [ComparisonRow],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct YtdReport<'a> {
    current_year: i32,
    previous_year: i32,
    through: Month,
    summary: &'a [ComparisonRow],
    category: Category,
    monthly_breakdown: &'a [MonthlyCumulativeValue],
}

fn rows_of(set: &MtdKpiSet) -> Vec<ComparisonRow> {
    set.iter()
        .map(|(&category, values)| ComparisonRow::new(category, values))
        .collect()
}

fn write_json<W: Write, T: Serialize>(value: &T, out: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write, T: Serialize>(rows: &[T], out: &mut W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn achievement_cell(achievement: Option<f64>) -> String {
    achievement.map_or_else(|| "-".to_string(), |a| format!("{:.2}%", a))
}

fn write_comparison_table<W: Write>(
    title: &str,
    rows: &[ComparisonRow],
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(
        out,
        "{:<16} {:>16} {:>16} {:>10} {:>16} {:>10}",
        "Category", "Current", "Previous", "Change", "Target", "Achieved"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<16} {:>16} {:>16} {:>10} {:>16} {:>10}",
            row.category.label(),
            format_value(row.category, row.current),
            format_value(row.category, row.previous),
            format_change(row.percent_change),
            format_value(row.category, row.target),
            achievement_cell(row.achievement),
        )?;
    }
    Ok(())
}

fn write_comparison<W: Write>(
    title: &str,
    rows: &[ComparisonRow],
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => write_comparison_table(title, rows, out),
        OutputFormat::Json => write_json(&ComparisonReport { title, rows }, out),
        OutputFormat::Csv => write_csv(rows, out),
    }
}

/// YTD summary for every category and the running totals of `category`.
pub fn ytd<W: Write>(
    dataset: &Dataset,
    category: Category,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let comparison = TillDateComparison::build(&dataset.rows, dataset.month, &dataset.targets);
    let summary: Vec<ComparisonRow> = Category::ALL
        .iter()
        .filter_map(|&c| comparison.ytd(c).map(|set| ComparisonRow::new(c, &set.summary)))
        .collect();
    let breakdown = comparison
        .ytd(category)
        .map(|set| set.monthly_breakdown.as_slice())
        .unwrap_or_default();

    match format {
        OutputFormat::Json => write_json(
            &YtdReport {
                current_year: dataset.current_year,
                previous_year: dataset.previous_year,
                through: dataset.month,
                summary: &summary,
                category,
                monthly_breakdown: breakdown,
            },
            out,
        ),
        OutputFormat::Csv => write_csv(&summary, out),
        OutputFormat::Table => {
            let title = format!(
                "YTD Jan-{} {} vs {}",
                dataset.month, dataset.current_year, dataset.previous_year
            );
            write_comparison_table(&title, &summary, out)?;
            writeln!(out)?;
            write_cumulative_table(dataset, category, breakdown, out)
        }
    }
}

/// `dataset.month` against the same month of the previous year.
pub fn mtd<W: Write>(dataset: &Dataset, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    let set = mtd_comparison(&dataset.rows, dataset.month, &dataset.targets);
    let title = format!(
        "MTD {} {} vs {} {}",
        dataset.month, dataset.current_year, dataset.month, dataset.previous_year
    );
    write_comparison(&title, &rows_of(&set), format, out)
}

/// `dataset.month` against the month before it.
pub fn month_over_month<W: Write>(
    dataset: &Dataset,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let set = comparison::month_over_month(&dataset.rows, dataset.month, &dataset.targets);
    let (baseline_month, baseline_year) = match dataset.month.previous() {
        Some(month) => (month, dataset.current_year),
        None => (Month::Dec, dataset.previous_year),
    };
    let title = format!(
        "MTD {} {} vs {} {}",
        dataset.month, dataset.current_year, baseline_month, baseline_year
    );
    write_comparison(&title, &rows_of(&set), format, out)
}

fn write_cumulative_table<W: Write>(
    dataset: &Dataset,
    category: Category,
    series: &[MonthlyCumulativeValue],
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "{} running total", category.label())?;
    writeln!(
        out,
        "{:<6} {:>16} {:>16}",
        "Month", dataset.current_year, dataset.previous_year
    )?;
    for value in series {
        writeln!(
            out,
            "{:<6} {:>16} {:>16}",
            value.month,
            format_value(category, value.current_cumulative),
            format_value(category, value.previous_cumulative),
        )?;
    }
    Ok(())
}

/// Twelve months of running totals for `category`.
pub fn cumulative<W: Write>(
    dataset: &Dataset,
    category: Category,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let series = cumulative_series(&dataset.rows, category);
    match format {
        OutputFormat::Table => write_cumulative_table(dataset, category, &series, out),
        OutputFormat::Json => write_json(&series, out),
        OutputFormat::Csv => write_csv(&series, out),
    }
}

/// Current-year revenue split for the month, or January through it.
pub fn mix<W: Write>(
    dataset: &Dataset,
    year_to_date: bool,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let period = if year_to_date {
        Period::YearToDate(dataset.month)
    } else {
        Period::Month(dataset.month)
    };
    let shares: Vec<RevenueShare> = revenue_mix(&dataset.rows, period);
    match format {
        OutputFormat::Json => write_json(&shares, out),
        OutputFormat::Csv => write_csv(&shares, out),
        OutputFormat::Table => {
            let title = if year_to_date {
                format!("Revenue mix Jan-{} {}", dataset.month, dataset.current_year)
            } else {
                format!("Revenue mix {} {}", dataset.month, dataset.current_year)
            };
            writeln!(out, "{}", title)?;
            for share in &shares {
                writeln!(
                    out,
                    "{:<16} {:>10} {:>8.2}%",
                    share.category.label(),
                    format_currency(share.value),
                    share.share
                )?;
            }
            Ok(())
        }
    }
}

/// The full till-date dataset as JSON, the shape a chart front end binds to.
pub fn export<W: Write>(dataset: &Dataset, out: &mut W) -> anyhow::Result<()> {
    let comparison = TillDateComparison::build(&dataset.rows, dataset.month, &dataset.targets);
    write_json(&comparison, out)
}
