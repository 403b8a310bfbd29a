//! Token table standing in for the JWT validator in router tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::SessionValidator;

/// Accepts only the tokens it was built with.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: HashMap<String, AuthenticatedUser>,
    failure: Option<AuthError>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shopper token for `user_id`.
    pub fn with_test_user(self, token: &str, user_id: &str) -> Self {
        self.with_role(token, user_id, Role::Customer)
    }

    pub fn with_test_admin(self, token: &str, user_id: &str) -> Self {
        self.with_role(token, user_id, Role::Admin)
    }

    /// Every validation fails with `error`, known tokens included.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.failure = Some(error);
        self
    }

    fn with_role(mut self, token: &str, user_id: &str, role: Role) -> Self {
        if let Ok(id) = UserId::new(user_id) {
            self.tokens.insert(token.to_string(), AuthenticatedUser::new(id, role));
        }
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_user_for_registered_token() {
        let validator = MockSessionValidator::new().with_test_user("token", "u1");
        let user = validator.validate("token").await.unwrap();
        assert_eq!(user.id.as_str(), "u1");
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn admin_tokens_carry_admin_role() {
        let validator = MockSessionValidator::new().with_test_admin("root", "a1");
        assert!(validator.validate("root").await.unwrap().is_admin());
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert_eq!(
            validator.validate("nope").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_test_user("token", "u1")
            .with_error(AuthError::TokenExpired);
        assert_eq!(
            validator.validate("token").await.unwrap_err(),
            AuthError::TokenExpired
        );
    }
}
