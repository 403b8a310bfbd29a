//! Order-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, ValidationError};

/// Order errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Order does not exist or is not visible to the caller.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// Input failed validation (empty order, total mismatch, bad status).
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// Store unavailable or other infrastructure failure.
    #[error("Orders unavailable: {0}")]
    Infrastructure(String),
}

impl OrderError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OrderError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::NotFound(_) => ErrorCode::OrderNotFound,
            OrderError::ValidationFailed { .. } => ErrorCode::InvalidArgument,
            OrderError::Infrastructure(_) => ErrorCode::Unavailable,
        }
    }
}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        OrderError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidArgument => OrderError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => OrderError::Infrastructure(err.message),
        }
    }
}
