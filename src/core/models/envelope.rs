use serde::{Deserialize, Serialize};

pub const MESSAGE_VERSION: &str = "1.0";
pub const STATUS_OK: u16 = 200;
pub const STATUS_ERROR: u16 = 400;

/// Response shape returned to the invoking agent framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub message_version: String,
    pub response: ActionResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    pub http_status_code: u16,
    pub response_body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(rename = "application/json")]
    pub application_json: JsonBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonBody {
    /// JSON-encoded result mapping.
    pub body: String,
}

impl Envelope {
    pub fn status_code(&self) -> u16 {
        self.response.http_status_code
    }

    pub fn is_error(&self) -> bool {
        self.response.http_status_code != STATUS_OK
    }

    /// The raw JSON body string.
    pub fn body(&self) -> &str {
        &self.response.response_body.application_json.body
    }

    /// Decode the body back into a JSON value.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(self.body())
    }
}
