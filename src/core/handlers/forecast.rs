use anyhow::{Context, Result};

use crate::core::dates::{end_of_next_month, format_date, tomorrow};
use crate::core::explorer::types::{CostForecastRequest, DateInterval};
use crate::core::handlers::{period_label, QueryContext};
use crate::core::models::forecast::{ForecastRecord, ForecastReport};
use crate::core::params::{get_or, ParamMap};

const METRIC: &str = "UNBLENDED_COST";

fn parse_amount(raw: Option<&str>, field: &str) -> Result<f64> {
    match raw {
        Some(s) => s
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} '{}' in forecast response", field, s)),
        None => Ok(0.0),
    }
}

/// Predicted spend, by default from tomorrow through the end of next month.
pub async fn get_cost_forecast(ctx: &QueryContext<'_>, params: &ParamMap) -> Result<ForecastReport> {
    let start_date = get_or(params, "start_date", format_date(tomorrow(ctx.today)));
    let end_date = get_or(params, "end_date", format_date(end_of_next_month(ctx.today)));
    let granularity = get_or(params, "granularity", "MONTHLY");

    let request = CostForecastRequest {
        time_period: DateInterval {
            start: start_date.clone(),
            end: end_date.clone(),
        },
        metric: METRIC.to_string(),
        granularity: granularity.clone(),
    };
    let response = ctx.api.get_cost_forecast(&request).await?;

    let total_forecast = parse_amount(
        response.total.as_ref().and_then(|t| t.amount.as_deref()),
        "total",
    )?;

    let breakdown = response
        .forecast_results_by_time
        .iter()
        .map(|period| {
            Ok(ForecastRecord {
                period: period_label(&period.time_period.start, &period.time_period.end),
                mean: parse_amount(Some(&period.mean_value), "mean value")?,
                low: parse_amount(period.prediction_interval_lower_bound.as_deref(), "lower bound")?,
                high: parse_amount(period.prediction_interval_upper_bound.as_deref(), "upper bound")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ForecastReport {
        forecast_period: period_label(&start_date, &end_date),
        granularity,
        total_forecast,
        breakdown,
    })
}
