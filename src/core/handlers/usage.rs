use anyhow::{Context, Result};

use crate::core::dates::{current_month_start, format_date};
use crate::core::explorer::types::{CostAndUsageRequest, DateInterval, GroupDefinition};
use crate::core::formatter::displayed_amount;
use crate::core::handlers::{period_label, QueryContext};
use crate::core::models::cost::{CostRecord, UsageReport};
use crate::core::params::{get_or, ParamMap};

const METRIC: &str = "UnblendedCost";

/// Historical spend for a date range, grouped by one dimension.
///
/// Parameters: `start_date` (first of the month), `end_date` (today),
/// `group_by` (`SERVICE`), `granularity` (`MONTHLY`).
pub async fn get_cost_and_usage(ctx: &QueryContext<'_>, params: &ParamMap) -> Result<UsageReport> {
    let start_date = get_or(params, "start_date", format_date(current_month_start(ctx.today)));
    let end_date = get_or(params, "end_date", format_date(ctx.today));
    let group_by = get_or(params, "group_by", "SERVICE");
    let granularity = get_or(params, "granularity", "MONTHLY");

    let request = CostAndUsageRequest {
        time_period: DateInterval {
            start: start_date.clone(),
            end: end_date.clone(),
        },
        granularity: granularity.clone(),
        metrics: vec![METRIC.to_string()],
        group_by: vec![GroupDefinition::dimension(&group_by)],
    };
    let response = ctx.api.get_cost_and_usage(&request).await?;

    let dimension = group_by.to_lowercase();
    let mut breakdown = Vec::new();
    let mut total = 0.0;

    for result in &response.results_by_time {
        let period = period_label(&result.time_period.start, &result.time_period.end);
        for group in &result.groups {
            let label = group
                .keys
                .first()
                .context("Cost group is missing its dimension key")?;
            let raw = group
                .metrics
                .get(METRIC)
                .and_then(|m| m.amount.as_deref())
                .with_context(|| format!("Cost group '{}' is missing the {} amount", label, METRIC))?;
            let amount: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid cost amount '{}' for '{}'", raw, label))?;
            total += amount;

            breakdown.push(CostRecord {
                period: period.clone(),
                dimension: dimension.clone(),
                label: label.clone(),
                amount,
            });
        }
    }

    // Ordered by the displayed amount; rows equal to the cent keep API order.
    breakdown.sort_by(|a, b| displayed_amount(b.amount).total_cmp(&displayed_amount(a.amount)));

    Ok(UsageReport {
        start_date,
        end_date,
        group_by,
        granularity,
        total,
        breakdown,
    })
}
