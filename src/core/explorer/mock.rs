//! In-memory `CostExplorerApi` for handler and dispatcher tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::explorer::types::{
    AnomaliesRequest, AnomaliesResponse, AnomalyMonitorsResponse, CostAndUsageRequest,
    CostAndUsageResponse, CostForecastRequest, CostForecastResponse,
};
use crate::core::explorer::{CostExplorerApi, ExplorerError};

/// Canned JSON responses per operation. An operation without one fails with an
/// API error, as does every operation when `failure` is set.
#[derive(Default)]
pub struct MockExplorer {
    pub cost_and_usage: Option<serde_json::Value>,
    pub forecast: Option<serde_json::Value>,
    pub monitors: Option<serde_json::Value>,
    pub anomalies: Option<serde_json::Value>,
    pub failure: Option<String>,
    pub calls: Mutex<Vec<Call>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CostAndUsage(CostAndUsageRequest),
    Forecast(CostForecastRequest),
    Monitors,
    Anomalies(AnomaliesRequest),
}

impl MockExplorer {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn respond<T: serde::de::DeserializeOwned>(
        &self,
        operation: &'static str,
        call: Call,
        canned: &Option<serde_json::Value>,
    ) -> Result<T, ExplorerError> {
        self.calls.lock().unwrap().push(call);
        if let Some(message) = &self.failure {
            return Err(ExplorerError::Api {
                operation,
                code: "MockFailure".to_string(),
                message: message.clone(),
            });
        }
        let value = canned.clone().ok_or_else(|| ExplorerError::Api {
            operation,
            code: "NotConfigured".to_string(),
            message: "no canned response".to_string(),
        })?;
        serde_json::from_value(value).map_err(|source| ExplorerError::Decode { operation, source })
    }
}

#[async_trait]
impl CostExplorerApi for MockExplorer {
    async fn get_cost_and_usage(
        &self,
        request: &CostAndUsageRequest,
    ) -> Result<CostAndUsageResponse, ExplorerError> {
        self.respond(
            "GetCostAndUsage",
            Call::CostAndUsage(request.clone()),
            &self.cost_and_usage,
        )
    }

    async fn get_cost_forecast(
        &self,
        request: &CostForecastRequest,
    ) -> Result<CostForecastResponse, ExplorerError> {
        self.respond("GetCostForecast", Call::Forecast(request.clone()), &self.forecast)
    }

    async fn get_anomaly_monitors(&self) -> Result<AnomalyMonitorsResponse, ExplorerError> {
        self.respond("GetAnomalyMonitors", Call::Monitors, &self.monitors)
    }

    async fn get_anomalies(
        &self,
        request: &AnomaliesRequest,
    ) -> Result<AnomaliesResponse, ExplorerError> {
        self.respond("GetAnomalies", Call::Anomalies(request.clone()), &self.anomalies)
    }
}
