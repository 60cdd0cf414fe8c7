use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw submission payload as it arrives from the form. Every field is
/// optional at this layer; the validator decides what is missing or
/// malformed and reports all violations at once. `services` stays loose JSON
/// so a wrong type surfaces as a validation message instead of a body-parse
/// failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBidRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub project_type: Option<String>,
    pub project_title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub services: Option<Value>,
    pub referral: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Uniform response envelope: `{success, message, data?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>, data: Value) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn ok_message(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>, data: Option<Value>) -> Self {
        ApiResponse {
            success: false,
            message: message.into(),
            data,
        }
    }
}
