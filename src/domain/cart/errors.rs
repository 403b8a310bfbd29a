//! Cart-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ProductId, ValidationError};

/// Cart errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// No line for the product exists in the cart.
    #[error("Item not found in cart: {0}")]
    LineNotFound(ProductId),

    /// The referenced product does not resolve in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Input failed validation.
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// Store unavailable or other infrastructure failure.
    #[error("Cart unavailable: {0}")]
    Infrastructure(String),
}

impl CartError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CartError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::LineNotFound(_) => ErrorCode::CartLineNotFound,
            CartError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            CartError::ValidationFailed { .. } => ErrorCode::InvalidArgument,
            CartError::Infrastructure(_) => ErrorCode::Unavailable,
        }
    }
}

impl From<ValidationError> for CartError {
    fn from(err: ValidationError) -> Self {
        CartError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for CartError {
    fn from(err: DomainError) -> Self {
        let product = err
            .details
            .get("product_id")
            .and_then(|raw| raw.parse::<ProductId>().ok());
        match (err.code, product) {
            (ErrorCode::CartLineNotFound, Some(id)) => CartError::LineNotFound(id),
            (ErrorCode::ProductNotFound, Some(id)) => CartError::ProductNotFound(id),
            (ErrorCode::InvalidArgument, _) => CartError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => CartError::Infrastructure(err.message),
        }
    }
}
