use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::config::{AwsSettings, CredentialMode};
use crate::core::explorer::signing::{sign_request, CredentialSource};
use crate::core::explorer::types::{
    AnomaliesRequest, AnomaliesResponse, AnomalyMonitorsRequest, AnomalyMonitorsResponse,
    CostAndUsageRequest, CostAndUsageResponse, CostForecastRequest, CostForecastResponse,
};
use crate::core::explorer::{CostExplorerApi, ExplorerError};

pub const DEFAULT_REGION: &str = "us-east-1";
const TARGET_PREFIX: &str = "AWSInsightsIndexService";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Default public endpoint for `region`.
pub fn default_endpoint(region: &str) -> String {
    format!("https://ce.{}.amazonaws.com", region)
}

/// Validate that an endpoint URL uses HTTPS before credentials are sent to it.
pub fn validate_endpoint(url: &str) -> anyhow::Result<()> {
    if !url.starts_with("https://") {
        anyhow::bail!("Cost Explorer endpoint must use HTTPS, got: {}", url);
    }
    Ok(())
}

#[derive(Deserialize)]
struct AwsErrorBody {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

/// Turn a non-2xx response body into an `ExplorerError::Api`.
fn parse_api_error(operation: &'static str, status: u16, body: &[u8]) -> ExplorerError {
    let parsed: Option<AwsErrorBody> = serde_json::from_slice(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|b| b.kind.as_deref())
        .map(|kind| kind.rsplit('#').next().unwrap_or(kind).to_string())
        .unwrap_or_else(|| format!("HTTP {}", status));
    let message = parsed
        .and_then(|b| b.message)
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());
    ExplorerError::Api {
        operation,
        code,
        message,
    }
}

/// Cost Explorer client speaking the AWS JSON 1.1 protocol over reqwest.
pub struct CostExplorerClient {
    http: reqwest::Client,
    endpoint: String,
    region: String,
    credentials: CredentialSource,
}

impl CostExplorerClient {
    pub fn new(
        endpoint: impl Into<String>,
        region: impl Into<String>,
        credentials: CredentialSource,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            region: region.into(),
            credentials,
        }
    }

    /// Build a client from the `[aws]` config section.
    pub async fn from_settings(settings: &AwsSettings) -> anyhow::Result<Self> {
        let endpoint = settings
            .endpoint
            .clone()
            .unwrap_or_else(|| default_endpoint(&settings.region));
        validate_endpoint(&endpoint)?;

        let credentials = match settings.credentials {
            CredentialMode::Static => {
                let (Some(key), Some(secret)) =
                    (&settings.access_key_id, &settings.secret_access_key)
                else {
                    anyhow::bail!(
                        "Static credentials require access_key_id and secret_access_key"
                    );
                };
                CredentialSource::from_keys(key, secret, settings.session_token.clone())
            }
            CredentialMode::Default => CredentialSource::default_chain(&settings.region).await?,
        };

        Ok(Self::new(endpoint, settings.region.clone(), credentials))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call<Req, Resp>(&self, operation: &'static str, body: &Req) -> Result<Resp, ExplorerError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)
            .map_err(|source| ExplorerError::Encode { operation, source })?;
        let url = format!("{}/", self.endpoint.trim_end_matches('/'));
        let target = format!("{}.{}", TARGET_PREFIX, operation);
        let headers = [("content-type", CONTENT_TYPE), ("x-amz-target", target.as_str())];

        let credentials = self.credentials.credentials().await?;
        let signed = sign_request(&credentials, &self.region, "POST", &url, &headers, &payload)?;

        tracing::debug!(operation, url = %url, "calling Cost Explorer");

        let mut request = self.http.post(&url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        for (name, value) in &signed {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.body(payload).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(parse_api_error(operation, status.as_u16(), &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|source| ExplorerError::Decode { operation, source })
    }
}

#[async_trait]
impl CostExplorerApi for CostExplorerClient {
    async fn get_cost_and_usage(
        &self,
        request: &CostAndUsageRequest,
    ) -> Result<CostAndUsageResponse, ExplorerError> {
        self.call("GetCostAndUsage", request).await
    }

    async fn get_cost_forecast(
        &self,
        request: &CostForecastRequest,
    ) -> Result<CostForecastResponse, ExplorerError> {
        self.call("GetCostForecast", request).await
    }

    async fn get_anomaly_monitors(&self) -> Result<AnomalyMonitorsResponse, ExplorerError> {
        self.call("GetAnomalyMonitors", &AnomalyMonitorsRequest::default())
            .await
    }

    async fn get_anomalies(
        &self,
        request: &AnomaliesRequest,
    ) -> Result<AnomaliesResponse, ExplorerError> {
        self.call("GetAnomalies", request).await
    }
}
