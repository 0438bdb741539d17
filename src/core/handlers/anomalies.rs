use anyhow::{Context, Result};

use crate::core::dates::{format_date, lookback_start};
use crate::core::explorer::types::{AnomaliesRequest, Anomaly, AnomalyDateInterval, RootCauseRaw};
use crate::core::handlers::{period_label, QueryContext};
use crate::core::models::anomaly::{AnomalyOutcome, AnomalyRecord, AnomalyReport, RootCause};
use crate::core::params::{get_bounded_u32, ParamMap};

pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
const UNKNOWN: &str = "Unknown";

fn or_unknown(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| UNKNOWN.to_string())
}

fn root_cause(raw: &RootCauseRaw) -> RootCause {
    RootCause {
        service: or_unknown(&raw.service),
        region: or_unknown(&raw.region),
        usage_type: or_unknown(&raw.usage_type),
    }
}

fn anomaly_record(anomaly: &Anomaly) -> AnomalyRecord {
    let impact = anomaly.impact.clone().unwrap_or_default();
    AnomalyRecord {
        anomaly_id: anomaly.anomaly_id.clone(),
        start_date: anomaly.anomaly_start_date.clone(),
        end_date: anomaly.anomaly_end_date.clone(),
        dimension: or_unknown(&anomaly.dimension_value),
        expected_spend: impact.total_expected_spend.unwrap_or(0.0),
        actual_spend: impact.total_actual_spend.unwrap_or(0.0),
        impact: impact.total_impact.unwrap_or(0.0),
        impact_percentage: impact.total_impact_percentage.unwrap_or(0.0),
        root_causes: anomaly.root_causes.iter().map(root_cause).collect(),
    }
}

/// Detected cost anomalies over the last `lookback_days` days.
///
/// Without `monitor_arn`, the first monitor the account lists is used. An
/// account with no monitors yields [`AnomalyOutcome::NoMonitors`].
pub async fn get_anomalies(ctx: &QueryContext<'_>, params: &ParamMap) -> Result<AnomalyOutcome> {
    let lookback_days = get_bounded_u32(
        params,
        "lookback_days",
        DEFAULT_LOOKBACK_DAYS,
        ctx.max_lookback_days,
    )?;
    let start = lookback_start(ctx.today, lookback_days).with_context(|| {
        format!(
            "Invalid value for lookback_days: {} reaches past the earliest supported date",
            lookback_days
        )
    })?;
    let start_date = format_date(start);
    let end_date = format_date(ctx.today);

    let monitor_arn = match params.get("monitor_arn").filter(|arn| !arn.is_empty()) {
        Some(arn) => arn.clone(),
        None => {
            let monitors = ctx.api.get_anomaly_monitors().await?;
            match monitors.anomaly_monitors.into_iter().next() {
                Some(monitor) => monitor.monitor_arn,
                None => return Ok(AnomalyOutcome::no_monitors()),
            }
        }
    };

    let request = AnomaliesRequest {
        monitor_arn: monitor_arn.clone(),
        date_interval: AnomalyDateInterval {
            start_date: start_date.clone(),
            end_date: end_date.clone(),
        },
    };
    let response = ctx.api.get_anomalies(&request).await?;

    let anomalies: Vec<AnomalyRecord> = response.anomalies.iter().map(anomaly_record).collect();

    Ok(AnomalyOutcome::Found(AnomalyReport {
        lookback_period: period_label(&start_date, &end_date),
        monitor_arn,
        anomaly_count: anomalies.len(),
        anomalies,
    }))
}
