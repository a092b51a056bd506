// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationError,
    DependencyError,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Vec<FieldError>,
}

/// The body shape of every non-2xx response: `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn invalid_limit(raw: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationError,
            "Validation failed.",
            vec![FieldError {
                field: "limit".to_string(),
                message: format!("Limit must be between 1 and 20, got '{raw}'."),
            }],
        )
    }

    #[must_use]
    pub fn invalid_cursor(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationError,
            "Validation failed.",
            vec![FieldError {
                field: "cursor".to_string(),
                message: format!("Invalid cursor format: {reason}."),
            }],
        )
    }

    #[must_use]
    pub fn dependency_unavailable(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::DependencyError, message, Vec::new())
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Internal, message, Vec::new())
    }

    #[must_use]
    pub fn into_envelope(self) -> ErrorEnvelope {
        ErrorEnvelope { error: self }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_serialize_as_screaming_snake() {
        let err = ApiError::invalid_limit("50");
        let value = serde_json::to_value(err.into_envelope()).expect("serialize");
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(value["error"]["details"][0]["field"], "limit");
    }

    #[test]
    fn cursor_and_limit_share_the_error_kind() {
        let limit = ApiError::invalid_limit("0");
        let cursor = ApiError::invalid_cursor("not base64");
        assert_eq!(limit.code, cursor.code);
        assert_ne!(limit.details[0].field, cursor.details[0].field);
    }

    #[test]
    fn dependency_error_carries_no_field_details() {
        let err = ApiError::dependency_unavailable("content store unavailable");
        assert_eq!(err.code, ApiErrorCode::DependencyError);
        assert!(err.details.is_empty());
    }
}
