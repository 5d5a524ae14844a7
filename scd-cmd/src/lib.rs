//! Command implementations for the SCD CLI.
//!
//! Each subcommand loads the monthly records and targets (embedded, or
//! from files given on the command line), aligns the two years being
//! compared, and prints one of the dashboard's comparison datasets.

use clap::{Args, Subcommand, ValueEnum};
use scd_kpi::{Category, Month};
use std::io::Write;
use std::path::PathBuf;

pub mod load;
pub mod report;

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Data selection shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct DataOptions {
    /// Monthly records CSV to use instead of the embedded table
    #[arg(long, global = true)]
    pub records: Option<PathBuf>,

    /// Targets CSV (`category,target`) to use instead of the embedded table
    #[arg(long, global = true)]
    pub targets: Option<PathBuf>,

    /// Year being reported on [default: latest year in the records]
    #[arg(long, global = true)]
    pub current_year: Option<i32>,

    /// Baseline year [default: the year before the current year]
    #[arg(long, global = true)]
    pub previous_year: Option<i32>,

    /// Reporting date (YYYY-MM-DD); selects the comparison month and year
    #[arg(long, global = true, conflicts_with = "month")]
    pub as_of: Option<String>,

    /// Comparison month, e.g. "Jun" [default: latest month with figures]
    #[arg(long, global = true)]
    pub month: Option<Month>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Year-to-date summary for every category, plus one category's running totals
    Ytd {
        /// Category whose monthly breakdown is listed
        #[arg(short, long, default_value = "totalRevenue")]
        category: Category,
    },

    /// Month-to-date comparison against the same month last year
    Mtd,

    /// Month-to-date comparison against the preceding month
    Mom,

    /// Running totals for one category, January through December
    Cumulative {
        /// Category to accumulate
        #[arg(short, long)]
        category: Category,
    },

    /// Revenue split between parts, labour and accessories
    Mix {
        /// Use year-to-date totals instead of the single month
        #[arg(long)]
        ytd: bool,
    },

    /// Full YTD and MTD datasets as JSON
    Export,
}

pub fn run(options: &DataOptions, command: Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(options, command, &mut out)
}

pub fn run_with_output<W: Write>(
    options: &DataOptions,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()> {
    let dataset = load::load(options)?;
    let format = options.format;
    match command {
        Command::Ytd { category } => report::ytd(&dataset, category, format, out),
        Command::Mtd => report::mtd(&dataset, format, out),
        Command::Mom => report::month_over_month(&dataset, format, out),
        Command::Cumulative { category } => report::cumulative(&dataset, category, format, out),
        Command::Mix { ytd } => report::mix(&dataset, ytd, format, out),
        Command::Export => report::export(&dataset, out),
    }
}
