// src/utils/error.rs

use crate::services::core::infrastructure::store::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type TabResult<T> = Result<T, TabError>;

/// Custom error details for additional context
pub type ErrorDetails = HashMap<String, serde_json::Value>;

/// Main error type for the tab-cause data-access core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabError {
    pub message: String,
    pub details: Option<Box<ErrorDetails>>,
    pub error_code: Option<String>,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    #[default]
    UnknownError,
    DecodeError,
    InvalidStrategyError,
    MissingRevenueError,
    MissingAggregationStrategyError,
    KeyCollisionError,
    DatabaseError,
    ValidationError,
    AuthorizationError,
    ConfigurationError,
    NotFoundError,
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TabError {}

impl TabError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
            error_code: None,
            kind,
        }
    }

    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = Some(Box::new(details));
        self
    }

    pub fn with_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self
    }

    // Convenience constructors for common error types
    pub fn decode_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DecodeError, message).with_code("DECODE_ERROR")
    }

    pub fn invalid_strategy(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidStrategyError, message).with_code("INVALID_STRATEGY")
    }

    pub fn missing_revenue(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingRevenueError, message).with_code("MISSING_REVENUE")
    }

    pub fn missing_aggregation_strategy(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingAggregationStrategyError, message)
            .with_code("MISSING_AGGREGATION_STRATEGY")
    }

    pub fn key_collision(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::KeyCollisionError, message).with_code("KEY_COLLISION")
    }

    pub fn database_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DatabaseError, message).with_code("DATABASE_ERROR")
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message).with_code("VALIDATION_ERROR")
    }

    pub fn authorization_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthorizationError, message).with_code("AUTH_Z_ERROR")
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigurationError, message).with_code("CONFIGURATION_ERROR")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFoundError, message).with_code("NOT_FOUND")
    }
}

/// Store failures other than a key collision propagate unmodified in message.
/// The collision variant keeps its own kind so the recorder's retry branch
/// stays an explicit, matchable path.
impl From<StoreError> for TabError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::KeyCollision { .. } => Self::key_collision(message),
            _ => Self::database_error(message),
        }
    }
}
