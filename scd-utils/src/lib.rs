//! Shared utility functions for SCD crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;
    use scd_kpi::Month;

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Reporting month for an as-of date given as "YYYY-MM-DD".
    pub fn reporting_month(s: &str) -> anyhow::Result<(i32, Month)> {
        use chrono::Datelike;
        let date = parse_date(s)?;
        Ok((date.year(), Month::from_date(&date)))
    }

}

/// Display formatting for table output
pub mod format {
    use scd_kpi::Category;

    /// Compact rupee amount: `₹1.2M` from a million up, `₹4.5L` from a
    /// lakh up, otherwise whole thousands (`₹85K`).
    pub fn format_currency(value: f64) -> String {
        if value >= 1_000_000.0 {
            format!("₹{:.1}M", value / 1_000_000.0)
        } else if value >= 100_000.0 {
            format!("₹{:.1}L", value / 100_000.0)
        } else {
            format!("₹{:.0}K", value / 1000.0)
        }
    }

    /// Rupee amount in lakh with two decimals, e.g. `₹190.14 Lac`.
    pub fn format_lac(value: f64) -> String {
        format!("₹{:.2} Lac", value / 100_000.0)
    }

    /// Signed percentage with two decimals; `n/a` when there is no baseline.
    pub fn format_change(change: Option<f64>) -> String {
        match change {
            Some(c) if c > 0.0 => format!("+{:.2}%", c),
            Some(c) => format!("{:.2}%", c),
            None => "n/a".to_string(),
        }
    }

    /// Revenue as lakh, counts as whole numbers.
    pub fn format_value(category: Category, value: f64) -> String {
        if category.is_revenue() {
            format_lac(value)
        } else {
            format!("{:.0}", value)
        }
    }

}
