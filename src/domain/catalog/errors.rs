//! Catalog-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ProductId, ValidationError};

/// Catalog errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Product was not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Product fields failed validation.
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// Store unavailable or other infrastructure failure.
    #[error("Catalog unavailable: {0}")]
    Infrastructure(String),
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::NotFound(_) => ErrorCode::ProductNotFound,
            CatalogError::ValidationFailed { .. } => ErrorCode::InvalidArgument,
            CatalogError::Infrastructure(_) => ErrorCode::Unavailable,
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        let product = err
            .details
            .get("product_id")
            .and_then(|raw| raw.parse::<ProductId>().ok());
        match (err.code, product) {
            (ErrorCode::ProductNotFound, Some(id)) => CatalogError::NotFound(id),
            (ErrorCode::InvalidArgument, _) => CatalogError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => CatalogError::Infrastructure(err.message),
        }
    }
}
