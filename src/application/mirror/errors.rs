//! Cart mirror error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors returned by the client-side cart mirror.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MirrorError {
    /// The operation needs a signed-in user, or the backend rejected the token.
    #[error("Authentication required")]
    Unauthorized,

    /// The backend rejected the request as invalid.
    #[error("Invalid request: {0}")]
    InvalidArgument(String),

    /// The backend does not know the referenced cart line, product or order.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend or local storage could not be reached.
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl MirrorError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MirrorError::Unauthorized => ErrorCode::Unauthorized,
            MirrorError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            MirrorError::NotFound(_) => ErrorCode::NotFound,
            MirrorError::Unavailable(_) => ErrorCode::Unavailable,
        }
    }
}

impl From<DomainError> for MirrorError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Unauthorized | ErrorCode::Forbidden => MirrorError::Unauthorized,
            ErrorCode::InvalidArgument => MirrorError::InvalidArgument(err.message),
            code if code.is_not_found() => MirrorError::NotFound(err.message),
            _ => MirrorError::Unavailable(err.message),
        }
    }
}
