pub mod anomalies;
pub mod forecast;
pub mod usage;

use chrono::NaiveDate;

use crate::core::explorer::CostExplorerApi;

/// Everything a query handler needs besides its parameters.
pub struct QueryContext<'a> {
    pub api: &'a dyn CostExplorerApi,
    /// Reference date for every default range.
    pub today: NaiveDate,
    pub max_lookback_days: u32,
}

/// "<start> to <end>"
pub(crate) fn period_label(start: &str, end: &str) -> String {
    format!("{} to {}", start, end)
}
