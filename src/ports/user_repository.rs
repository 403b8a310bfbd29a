//! User directory port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::UserProfile;

/// Optional filters for listing users. Both match exactly,
/// ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub email: Option<String>,
    pub city: Option<String>,
}

impl UserFilter {
    pub fn matches(&self, user: &UserProfile) -> bool {
        self.email.as_deref().map_or(true, |email| {
            user.email()
                .map_or(false, |stored| stored.eq_ignore_ascii_case(email))
        }) && self
            .city
            .as_deref()
            .map_or(true, |city| user.city().eq_ignore_ascii_case(city))
    }
}

/// Repository port for user profiles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// List users matching the filter, oldest first.
    async fn list(&self, filter: &UserFilter) -> Result<Vec<UserProfile>, DomainError>;

    /// Insert or replace a profile.
    async fn save(&self, user: &UserProfile) -> Result<(), DomainError>;

    /// Delete a profile.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user doesn't exist
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}

/// The error every adapter returns for an unknown user.
pub fn user_not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::NotFound, "User not found").with_detail("user_id", id.as_str())
}
