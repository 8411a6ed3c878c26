//! Error response DTOs.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Standard error response format.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "Resource not found: entry with id=7"
}))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    /// Adds structured details to the error response.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_omitted() {
        let body = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "gone")).unwrap();
        assert_eq!(body, json!({"code": "NOT_FOUND", "message": "gone"}));
    }

    #[test]
    fn test_details_and_request_id_serialize() {
        let body = ErrorResponse::new("VALIDATION_ERROR", "bad")
            .with_details(json!({"field": "amount"}))
            .with_request_id("req-1");
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["details"]["field"], "amount");
        assert_eq!(value["request_id"], "req-1");
    }
}
