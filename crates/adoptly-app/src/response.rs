// Rust guideline compliant 2026-10-16

//! Response envelopes for command outputs.

use crate::error::{AppError, ErrorCode};
use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    /// `"created"` for new listings, `"ok"` otherwise.
    pub status: &'static str,
    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Result payload.
    pub result: T,
}

impl<T> SuccessEnvelope<T> {
    /// Creates an `"ok"` envelope.
    #[must_use]
    pub fn new(result: T) -> Self {
        Self {
            status: "ok",
            message: None,
            result,
        }
    }

    /// Creates a `"created"` envelope.
    #[must_use]
    pub fn created(result: T) -> Self {
        Self {
            status: "created",
            message: None,
            result,
        }
    }

    /// Attaches a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Standard error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Creates a new error envelope from an application error.
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
            details: error.details(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adoptly_core::Field;

    #[test]
    fn test_created_envelope_shape() {
        let envelope = SuccessEnvelope::created(serde_json::json!({"id": "x"}))
            .with_message("Pet listed");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "created");
        assert_eq!(value["message"], "Pet listed");
        assert_eq!(value["result"]["id"], "x");
    }

    #[test]
    fn test_error_envelope_carries_field() {
        let envelope = ErrorEnvelope::from_error(&AppError::missing(Field::Color));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["code"], "validation_failed");
        assert_eq!(value["details"]["field"], "color");
    }
}
