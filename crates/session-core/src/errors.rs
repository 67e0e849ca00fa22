// ABOUTME: Unified error types for the session engine with categorized error codes
// ABOUTME: Provides AppError, ErrorCode, and AppResult shared by every workspace crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

//! # Unified Error Handling System
//!
//! Centralized error type for the session engine. Missing data and unknown
//! tags never surface here; they resolve to defaults. Errors are reserved for
//! rejected updates, remote persistence failures, and malformed JSON.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed a validation rule
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Numeric or length value outside its allowed range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3001,
    /// Muscle group selection would exceed the configured maximum
    #[serde(rename = "SELECTION_LIMIT_EXCEEDED")]
    SelectionLimitExceeded = 3002,

    // External Services (5000-5999)
    /// Remote persistence endpoint returned an error or a non-success envelope
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Remote persistence endpoint could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,

    // Serialization (9000-9999)
    /// JSON serialization or deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9000,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::SelectionLimitExceeded => "The selection limit has been reached",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the error was caused by caller-supplied input
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        (*self as u16) >= 3000 && (*self as u16) < 4000
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured details (field names, limits, remote status)
    pub details: serde_json::Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: serde_json::Value::Null,
            source: None,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside its allowed range, keyed by the offending field
    pub fn value_out_of_range(field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
            .with_details(serde_json::json!({ "field": field }))
    }

    /// Muscle group limit reached
    #[must_use]
    pub fn selection_limit(max_groups: usize) -> Self {
        Self::new(
            ErrorCode::SelectionLimitExceeded,
            format!("At most {max_groups} muscle groups can be selected"),
        )
        .with_details(serde_json::json!({ "max_groups": max_groups }))
    }

    /// Unknown field key
    pub fn unknown_field(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(ErrorCode::InvalidInput, format!("Unknown session field: {key}"))
            .with_details(serde_json::json!({ "field": key }))
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(feature = "http-errors")]
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let code = if error.is_connect() || error.is_timeout() {
            ErrorCode::ExternalServiceUnavailable
        } else {
            ErrorCode::ExternalServiceError
        };
        Self::new(code, format!("muscle selection endpoint: {error}")).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::invalid_input("bad focus");
        assert_eq!(
            error.to_string(),
            "The provided input is invalid: bad focus"
        );
    }

    #[test]
    fn test_selection_limit_details() {
        let error = AppError::selection_limit(3);
        assert_eq!(error.code, ErrorCode::SelectionLimitExceeded);
        assert_eq!(error.details["max_groups"], 3);
        assert!(error.code.is_validation());
    }

    #[test]
    fn test_error_code_ranges() {
        let validation = [
            ErrorCode::InvalidInput,
            ErrorCode::ValueOutOfRange,
            ErrorCode::SelectionLimitExceeded,
        ];
        assert!(validation.iter().all(ErrorCode::is_validation));
        assert!(!ErrorCode::ExternalServiceError.is_validation());
        assert!(!ErrorCode::ExternalServiceUnavailable.is_validation());
        assert_eq!(
            serde_json::to_value(ErrorCode::SelectionLimitExceeded).unwrap(),
            "SELECTION_LIMIT_EXCEEDED"
        );
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse: Result<u8, _> = serde_json::from_str("\"not a number\"");
        let error = AppError::from(parse.unwrap_err());
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(!error.code.is_validation());
        assert!(error.source().is_some());
    }
}
