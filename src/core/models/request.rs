use serde::{Deserialize, Serialize};

/// A single `{name, value}` pair from the invocation's parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

/// Inbound action-group invocation. Fields the router does not use
/// (`messageVersion`, `agent`, `sessionId`, `inputText`, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl InvocationRequest {
    /// Build a GET request for `api_path` with the given parameters.
    pub fn new(api_path: &str, parameters: Vec<Parameter>) -> Self {
        Self {
            action_group: None,
            api_path: Some(api_path.to_string()),
            http_method: Some("GET".to_string()),
            parameters,
        }
    }

    /// Append a parameter when `value` is present.
    pub fn with_param(mut self, name: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.parameters.push(Parameter {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        self
    }
}
