use colored::{control, Colorize};
use serde_json::Value;

use crate::core::dispatcher::Action;

fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("-")
}

fn rows(value: &Value, key: &str) -> Vec<Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Render a result body as a colored (or plain) text block.
///
/// Layout for a usage result:
/// ```text
///  Cost and usage (SERVICE, MONTHLY)
///   Period    2024-03-01 to 2024-03-10
///   Total     $42.17
///     $30.00  Amazon EC2        2024-03-01 to 2024-03-10
///     $12.17  Amazon S3         2024-03-01 to 2024-03-10
/// ```
pub fn render(action: Action, body: &Value, use_color: bool) -> String {
    control::set_override(use_color);

    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return render_error(error);
    }

    match action {
        Action::CostAndUsage => render_usage(body),
        Action::CostForecast => render_forecast(body),
        Action::Anomalies => render_anomalies(body),
    }
}

fn render_error(message: &str) -> String {
    format!("{}\n  {}", " Error".bold(), message.red())
}

fn render_usage(body: &Value) -> String {
    let group_by = text(body, "group_by");
    let dimension = group_by.to_lowercase();
    let mut lines = vec![format!(
        " Cost and usage ({}, {})",
        group_by,
        text(body, "granularity")
    )
    .bold()
    .to_string()];

    lines.push(format!(
        "  {}    {} to {}",
        "Period".cyan(),
        text(body, "start_date"),
        text(body, "end_date")
    ));
    lines.push(format!("  {}     {}", "Total".cyan(), text(body, "total").bold()));

    let breakdown = rows(body, "breakdown");
    if breakdown.is_empty() {
        lines.push("  No cost recorded for this period.".dimmed().to_string());
    }
    for row in &breakdown {
        lines.push(format!(
            "    {:>10}  {:<40}  {}",
            text(row, "amount"),
            text(row, &dimension),
            text(row, "period").dimmed()
        ));
    }
    lines.join("\n")
}

fn render_forecast(body: &Value) -> String {
    let mut lines = vec![format!(" Cost forecast ({})", text(body, "granularity"))
        .bold()
        .to_string()];
    lines.push(format!("  {}    {}", "Period".cyan(), text(body, "forecast_period")));
    lines.push(format!(
        "  {}  {}",
        "Forecast".cyan(),
        text(body, "total_forecast").bold()
    ));
    for row in rows(body, "breakdown") {
        lines.push(format!(
            "    {}  {} (range {} - {})",
            text(&row, "period"),
            text(&row, "mean"),
            text(&row, "low"),
            text(&row, "high")
        ));
    }
    lines.join("\n")
}

fn render_anomalies(body: &Value) -> String {
    let count = body.get("anomaly_count").and_then(Value::as_u64).unwrap_or(0);
    let mut lines = vec![" Cost anomalies".bold().to_string()];
    lines.push(format!("  {}    {}", "Period".cyan(), text(body, "lookback_period")));
    lines.push(format!("  {}   {}", "Monitor".cyan(), text(body, "monitor_arn")));
    lines.push(format!("  {}     {}", "Found".cyan(), count));

    for anomaly in rows(body, "anomalies") {
        lines.push(String::new());
        lines.push(format!(
            "  {}  {} ({} to {})",
            text(&anomaly, "dimension").yellow().bold(),
            text(&anomaly, "anomaly_id").dimmed(),
            text(&anomaly, "start_date"),
            text(&anomaly, "end_date")
        ));
        lines.push(format!(
            "    Impact {} ({}), expected {}, actual {}",
            text(&anomaly, "impact").red(),
            text(&anomaly, "impact_percentage"),
            text(&anomaly, "expected_spend"),
            text(&anomaly, "actual_spend")
        ));
        for cause in rows(&anomaly, "root_causes") {
            lines.push(format!(
                "    - {} / {} / {}",
                text(&cause, "service"),
                text(&cause, "region"),
                text(&cause, "usage_type")
            ));
        }
    }
    lines.join("\n")
}
