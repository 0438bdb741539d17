use serde::Serialize;

use crate::core::formatter::{serialize_currency, serialize_percentage};

pub const NO_MONITORS_MESSAGE: &str = "No anomaly monitors found. Create one first.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootCause {
    pub service: String,
    pub region: String,
    pub usage_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyRecord {
    pub anomaly_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dimension: String,
    #[serde(serialize_with = "serialize_currency")]
    pub expected_spend: f64,
    #[serde(serialize_with = "serialize_currency")]
    pub actual_spend: f64,
    #[serde(serialize_with = "serialize_currency")]
    pub impact: f64,
    #[serde(serialize_with = "serialize_percentage")]
    pub impact_percentage: f64,
    pub root_causes: Vec<RootCause>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnomalyReport {
    pub lookback_period: String,
    pub monitor_arn: String,
    pub anomaly_count: usize,
    pub anomalies: Vec<AnomalyRecord>,
}

/// Result of an anomaly query. `NoMonitors` is a regular outcome that still
/// carries an `error` key in its serialized form.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnomalyOutcome {
    Found(AnomalyReport),
    NoMonitors {
        error: String,
        anomalies: Vec<AnomalyRecord>,
    },
}

impl AnomalyOutcome {
    pub fn no_monitors() -> Self {
        Self::NoMonitors {
            error: NO_MONITORS_MESSAGE.to_string(),
            anomalies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_monitors_serializes_error_and_empty_list() {
        let json = serde_json::to_string(&AnomalyOutcome::no_monitors()).unwrap();
        assert_eq!(
            json,
            r#"{"error":"No anomaly monitors found. Create one first.","anomalies":[]}"#
        );
    }

    #[test]
    fn anomaly_record_formats_amounts() {
        let record = AnomalyRecord {
            anomaly_id: Some("a-1".to_string()),
            start_date: Some("2024-03-01".to_string()),
            end_date: None,
            dimension: "Amazon S3".to_string(),
            expected_spend: 10.0,
            actual_spend: 25.456,
            impact: 15.456,
            impact_percentage: 154.56,
            root_causes: vec![RootCause {
                service: "Amazon S3".to_string(),
                region: "Unknown".to_string(),
                usage_type: "Requests-Tier1".to_string(),
            }],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["expected_spend"], "$10.00");
        assert_eq!(value["actual_spend"], "$25.46");
        assert_eq!(value["impact"], "$15.46");
        assert_eq!(value["impact_percentage"], "154.6%");
        assert!(value["end_date"].is_null());
        assert_eq!(value["root_causes"][0]["usage_type"], "Requests-Tier1");
    }
}
