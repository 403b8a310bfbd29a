//! User directory error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// User directory errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// An administrator tried to demote or delete their own account.
    #[error("Administrators cannot {0} their own account")]
    SelfModification(&'static str),

    #[error("User directory unavailable: {0}")]
    Infrastructure(String),
}

impl UserError {
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::NotFound,
            UserError::ValidationFailed { .. } | UserError::SelfModification(_) => {
                ErrorCode::InvalidArgument
            }
            UserError::Infrastructure(_) => ErrorCode::Unavailable,
        }
    }
}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        UserError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        let user = err
            .details
            .get("user_id")
            .and_then(|raw| UserId::new(raw.as_str()).ok());
        match (err.code, user) {
            (ErrorCode::NotFound, Some(id)) => UserError::NotFound(id),
            (ErrorCode::InvalidArgument, _) => UserError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => UserError::Infrastructure(err.message),
        }
    }
}
