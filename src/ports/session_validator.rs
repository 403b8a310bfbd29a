//! Bearer token verification.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Turns a bearer token into the caller it was issued to.
///
/// Implementations return `InvalidToken` for malformed or forged tokens,
/// `TokenExpired` once `exp` has passed, and `ServiceUnavailable` when they
/// cannot check at all. Callers pass the token without its `Bearer ` prefix.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
