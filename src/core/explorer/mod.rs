pub mod client;
#[cfg(test)]
pub mod mock;
pub mod signing;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

use types::{
    AnomaliesRequest, AnomaliesResponse, AnomalyMonitorsResponse, CostAndUsageRequest,
    CostAndUsageResponse, CostForecastRequest, CostForecastResponse,
};

pub use client::CostExplorerClient;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("No AWS credentials provider available")]
    NoCredentialsProvider,
    #[error("Failed to load AWS credentials: {0}")]
    Credentials(String),
    #[error("Failed to sign request: {0}")]
    Signing(String),
    #[error("Request to Cost Explorer failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{operation} failed ({code}): {message}")]
    Api {
        operation: &'static str,
        code: String,
        message: String,
    },
    #[error("Failed to encode {operation} request: {source}")]
    Encode {
        operation: &'static str,
        source: serde_json::Error,
    },
    #[error("Failed to parse {operation} response: {source}")]
    Decode {
        operation: &'static str,
        source: serde_json::Error,
    },
}

/// The four Cost Explorer operations the router depends on.
#[async_trait]
pub trait CostExplorerApi: Send + Sync {
    async fn get_cost_and_usage(
        &self,
        request: &CostAndUsageRequest,
    ) -> Result<CostAndUsageResponse, ExplorerError>;

    async fn get_cost_forecast(
        &self,
        request: &CostForecastRequest,
    ) -> Result<CostForecastResponse, ExplorerError>;

    async fn get_anomaly_monitors(&self) -> Result<AnomalyMonitorsResponse, ExplorerError>;

    async fn get_anomalies(
        &self,
        request: &AnomaliesRequest,
    ) -> Result<AnomaliesResponse, ExplorerError>;
}
