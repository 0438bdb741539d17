use serde_json::Value;

use crate::core::models::envelope::{
    ActionResponse, Envelope, JsonBody, ResponseBody, MESSAGE_VERSION, STATUS_ERROR, STATUS_OK,
};
use crate::core::models::request::InvocationRequest;

pub const DEFAULT_ACTION_GROUP: &str = "cost-explorer-actions";
pub const DEFAULT_HTTP_METHOD: &str = "GET";

/// Wrap a result mapping in the agent response envelope.
///
/// Any result carrying an `error` key gets the error status, including regular
/// results that report a condition through that key.
pub fn format_response(
    request: &InvocationRequest,
    result: &Value,
    fallback_action_group: &str,
) -> Envelope {
    let status = if result.get("error").is_some() {
        STATUS_ERROR
    } else {
        STATUS_OK
    };

    Envelope {
        message_version: MESSAGE_VERSION.to_string(),
        response: ActionResponse {
            action_group: request
                .action_group
                .clone()
                .unwrap_or_else(|| fallback_action_group.to_string()),
            api_path: request.api_path.clone().unwrap_or_default(),
            http_method: request
                .http_method
                .clone()
                .unwrap_or_else(|| DEFAULT_HTTP_METHOD.to_string()),
            http_status_code: status,
            response_body: ResponseBody {
                application_json: JsonBody {
                    body: result.to_string(),
                },
            },
        },
    }
}
