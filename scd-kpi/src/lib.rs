//! Core types for the service center dashboard.
//!
//! Raw monthly records, the closed month and category keys, the comparison
//! value objects consumed by chart renderers, and the data tables that are
//! embedded at build time.

pub mod category;
pub mod comparison;
pub mod error;
pub mod month;
pub mod record;
pub mod source;
pub mod target;

pub use category::Category;
pub use comparison::{ComparisonMetricValues, MonthlyCumulativeValue};
pub use error::{KpiError, Result};
pub use month::Month;
pub use record::MonthlyRawRecord;
pub use source::{RecordSource, StaticTable};
pub use target::Targets;
