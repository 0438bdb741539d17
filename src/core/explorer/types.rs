//! Request and response bodies for the Cost Explorer JSON protocol.
//!
//! Field names follow the service's PascalCase wire format. Response fields the
//! router never reads are left out and ignored during decoding.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateInterval {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupDefinition {
    #[serde(rename = "Type")]
    pub kind: String,
    pub key: String,
}

impl GroupDefinition {
    pub fn dimension(key: &str) -> Self {
        Self {
            kind: "DIMENSION".to_string(),
            key: key.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAndUsageRequest {
    pub time_period: DateInterval,
    pub granularity: String,
    pub metrics: Vec<String>,
    pub group_by: Vec<GroupDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAndUsageResponse {
    #[serde(default)]
    pub results_by_time: Vec<ResultByTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultByTime {
    pub time_period: DateInterval,
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub metrics: HashMap<String, MetricValue>,
}

/// Amounts are decimal strings on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostForecastRequest {
    pub time_period: DateInterval,
    pub metric: String,
    pub granularity: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostForecastResponse {
    pub total: Option<MetricValue>,
    #[serde(default)]
    pub forecast_results_by_time: Vec<ForecastResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForecastResult {
    pub time_period: DateInterval,
    pub mean_value: String,
    pub prediction_interval_lower_bound: Option<String>,
    pub prediction_interval_upper_bound: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnomalyMonitorsRequest {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnomalyMonitorsResponse {
    #[serde(default)]
    pub anomaly_monitors: Vec<AnomalyMonitor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnomalyMonitor {
    pub monitor_arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnomalyDateInterval {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnomaliesRequest {
    pub monitor_arn: String,
    pub date_interval: AnomalyDateInterval,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnomaliesResponse {
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Anomaly {
    pub anomaly_id: Option<String>,
    pub anomaly_start_date: Option<String>,
    pub anomaly_end_date: Option<String>,
    pub dimension_value: Option<String>,
    #[serde(default)]
    pub root_causes: Vec<RootCauseRaw>,
    pub impact: Option<Impact>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RootCauseRaw {
    pub service: Option<String>,
    pub region: Option<String>,
    pub usage_type: Option<String>,
}

/// Impact figures are JSON numbers on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Impact {
    pub total_impact: Option<f64>,
    pub total_actual_spend: Option<f64>,
    pub total_expected_spend: Option<f64>,
    pub total_impact_percentage: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_cost_and_usage_request() {
        let req = CostAndUsageRequest {
            time_period: DateInterval {
                start: "2024-01-01".to_string(),
                end: "2024-01-31".to_string(),
            },
            granularity: "MONTHLY".to_string(),
            metrics: vec!["UnblendedCost".to_string()],
            group_by: vec![GroupDefinition::dimension("SERVICE")],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"TimePeriod":{"Start":"2024-01-01","End":"2024-01-31"},"Granularity":"MONTHLY","Metrics":["UnblendedCost"],"GroupBy":[{"Type":"DIMENSION","Key":"SERVICE"}]}"#
        );
    }

    #[test]
    fn serialize_anomalies_request() {
        let req = AnomaliesRequest {
            monitor_arn: "arn:aws:ce::123:anomalymonitor/abc".to_string(),
            date_interval: AnomalyDateInterval {
                start_date: "2024-02-09".to_string(),
                end_date: "2024-03-10".to_string(),
            },
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["MonitorArn"], "arn:aws:ce::123:anomalymonitor/abc");
        assert_eq!(value["DateInterval"]["StartDate"], "2024-02-09");
    }

    #[test]
    fn serialize_monitors_request_is_empty_object() {
        assert_eq!(serde_json::to_string(&AnomalyMonitorsRequest {}).unwrap(), "{}");
    }

    #[test]
    fn deserialize_cost_and_usage_response() {
        let json = r#"{
            "GroupDefinitions": [{ "Type": "DIMENSION", "Key": "SERVICE" }],
            "ResultsByTime": [{
                "TimePeriod": { "Start": "2024-01-01", "End": "2024-02-01" },
                "Total": {},
                "Groups": [{
                    "Keys": ["Amazon Simple Storage Service"],
                    "Metrics": { "UnblendedCost": { "Amount": "1.2345", "Unit": "USD" } }
                }],
                "Estimated": false
            }],
            "DimensionValueAttributes": []
        }"#;
        let resp: CostAndUsageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results_by_time.len(), 1);
        let group = &resp.results_by_time[0].groups[0];
        assert_eq!(group.keys[0], "Amazon Simple Storage Service");
        assert_eq!(group.metrics["UnblendedCost"].amount.as_deref(), Some("1.2345"));
    }

    #[test]
    fn deserialize_forecast_without_bounds() {
        let json = r#"{
            "Total": { "Amount": "250.5", "Unit": "USD" },
            "ForecastResultsByTime": [{
                "TimePeriod": { "Start": "2024-03-11", "End": "2024-04-01" },
                "MeanValue": "180.25"
            }]
        }"#;
        let resp: CostForecastResponse = serde_json::from_str(json).unwrap();
        let period = &resp.forecast_results_by_time[0];
        assert_eq!(period.mean_value, "180.25");
        assert!(period.prediction_interval_lower_bound.is_none());
        assert_eq!(resp.total.unwrap().amount.as_deref(), Some("250.5"));
    }

    #[test]
    fn deserialize_anomaly_with_partial_root_cause() {
        let json = r#"{
            "Anomalies": [{
                "AnomalyId": "abc-123",
                "AnomalyStartDate": "2024-03-01",
                "AnomalyEndDate": "2024-03-02",
                "DimensionValue": "Amazon EC2",
                "MonitorArn": "arn:aws:ce::123:anomalymonitor/abc",
                "AnomalyScore": { "MaxScore": 0.9, "CurrentScore": 0.5 },
                "RootCauses": [{ "Service": "Amazon EC2", "LinkedAccount": "123" }],
                "Impact": { "MaxImpact": 20.0, "TotalImpact": 35.5, "TotalImpactPercentage": 71.0 }
            }]
        }"#;
        let resp: AnomaliesResponse = serde_json::from_str(json).unwrap();
        let anomaly = &resp.anomalies[0];
        assert_eq!(anomaly.anomaly_id.as_deref(), Some("abc-123"));
        assert!(anomaly.root_causes[0].region.is_none());
        let impact = anomaly.impact.as_ref().unwrap();
        assert_eq!(impact.total_impact, Some(35.5));
        assert!(impact.total_actual_spend.is_none());
    }

    #[test]
    fn deserialize_empty_monitor_list() {
        let resp: AnomalyMonitorsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.anomaly_monitors.is_empty());
    }
}
