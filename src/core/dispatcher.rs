use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::core::dates;
use crate::core::explorer::CostExplorerApi;
use crate::core::handlers::{anomalies, forecast, usage, QueryContext};
use crate::core::models::envelope::Envelope;
use crate::core::models::request::InvocationRequest;
use crate::core::params;
use crate::core::response::{format_response, DEFAULT_ACTION_GROUP};

/// Operations reachable through the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CostAndUsage,
    CostForecast,
    Anomalies,
}

impl Action {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|action| action.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CostAndUsage => "get_cost_and_usage",
            Self::CostForecast => "get_cost_forecast",
            Self::Anomalies => "get_anomalies",
        }
    }

    /// Path form used in invocation requests, e.g. `/get-cost-and-usage`.
    pub fn api_path(&self) -> String {
        format!("/{}", self.name().replace('_', "-"))
    }

    pub fn all() -> &'static [Action] {
        &[Action::CostAndUsage, Action::CostForecast, Action::Anomalies]
    }
}

fn echo_field(event: &Value, key: &str) -> Option<String> {
    event.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Derive the action name from an API path: outer slashes removed, hyphens to underscores.
pub fn action_name(api_path: &str) -> String {
    api_path.trim_matches('/').replace('-', "_")
}

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Echoed when the request carries no action group.
    pub action_group: String,
    pub max_lookback_days: u32,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            action_group: DEFAULT_ACTION_GROUP.to_string(),
            max_lookback_days: 90,
        }
    }
}

/// Routes invocation requests to query handlers and always answers with an envelope.
pub struct Dispatcher {
    api: Arc<dyn CostExplorerApi>,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn CostExplorerApi>, settings: DispatchSettings) -> Self {
        Self { api, settings }
    }

    /// Handle a raw JSON event. Events that fail to parse produce an error envelope,
    /// echoing whichever of `actionGroup`, `apiPath` and `httpMethod` could be read.
    pub async fn handle_json(&self, raw: &str) -> Envelope {
        let event: Value = match serde_json::from_str(raw) {
            Ok(event) => event,
            Err(e) => return self.reject(InvocationRequest::default(), e),
        };
        let echo = InvocationRequest {
            action_group: echo_field(&event, "actionGroup"),
            api_path: echo_field(&event, "apiPath"),
            http_method: echo_field(&event, "httpMethod"),
            parameters: Vec::new(),
        };
        match serde_json::from_value::<InvocationRequest>(event) {
            Ok(request) => self.handle(&request).await,
            Err(e) => self.reject(echo, e),
        }
    }

    fn reject(&self, echo: InvocationRequest, err: serde_json::Error) -> Envelope {
        tracing::error!(error = %err, "failed to parse invocation event");
        let result = json!({ "error": format!("Invalid invocation event: {}", err) });
        format_response(&echo, &result, &self.settings.action_group)
    }

    pub async fn handle(&self, request: &InvocationRequest) -> Envelope {
        self.handle_on(request, dates::today()).await
    }

    /// Handle `request` with `today` as the reference date for default ranges.
    pub async fn handle_on(&self, request: &InvocationRequest, today: NaiveDate) -> Envelope {
        if let Ok(event) = serde_json::to_string(request) {
            tracing::info!(event = %event, "received invocation");
        }

        let result = match self.route(request, today).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), "action failed");
                json!({ "error": format!("{:#}", e) })
            }
        };

        format_response(request, &result, &self.settings.action_group)
    }

    async fn route(&self, request: &InvocationRequest, today: NaiveDate) -> Result<Value> {
        let name = action_name(request.api_path.as_deref().unwrap_or_default());
        let params = params::extract(&request.parameters);

        let Some(action) = Action::from_name(&name) else {
            return Ok(json!({ "error": format!("Unknown action: {}", name) }));
        };

        let ctx = QueryContext {
            api: self.api.as_ref(),
            today,
            max_lookback_days: self.settings.max_lookback_days,
        };

        let result = match action {
            Action::CostAndUsage => {
                serde_json::to_value(usage::get_cost_and_usage(&ctx, &params).await?)?
            }
            Action::CostForecast => {
                serde_json::to_value(forecast::get_cost_forecast(&ctx, &params).await?)?
            }
            Action::Anomalies => {
                serde_json::to_value(anomalies::get_anomalies(&ctx, &params).await?)?
            }
        };
        Ok(result)
    }
}
