//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

/// Message body shared by success and error responses.
///
/// Only the populated field is serialized, so a success renders as
/// `{"message": "..."}` and an error as `{"errorMessage": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ApiMessage {
    /// Success message.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "File uploaded")]
    pub message: Option<String>,
    /// Error message.
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    #[schema(example = "There is no file by this file id: 1")]
    pub error_message: Option<String>,
}

impl ApiMessage {
    /// Create a success message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error_message: None,
        }
    }

    /// Create an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: None,
            error_message: Some(message.into()),
        }
    }
}
