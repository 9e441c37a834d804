//! Standardized JSON error body (RFC 7807 style).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Problem Details for HTTP APIs, extended with a human-readable `message`
/// and the time the error was produced.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    pub message: String,

    pub timestamp: DateTime<Utc>,

    /// Request ID for debugging purposes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            error_type: "about:blank".to_string(),
            message: title.clone(),
            title,
            status,
            timestamp: Utc::now(),
            request_id: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_message(message)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn forbidden() -> Self {
        Self::new(403, "Forbidden")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_message(message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_message(message)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error").with_message("An unexpected error occurred")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_has_message_and_timestamp() {
        let json = serde_json::to_value(ErrorResponse::not_found("Post not found")).unwrap();

        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["status"], 404);
        assert_eq!(json["message"], "Post not found");
        assert!(json["timestamp"].is_string());
        assert!(json.get("requestId").is_none());
    }

    #[test]
    fn test_message_defaults_to_title() {
        let error = ErrorResponse::forbidden();

        assert_eq!(error.message, "Forbidden");
    }
}
