//! Single-owner resources.
//!
//! Carts and orders are visible only to the user they belong to. Someone
//! else asking for one gets the same not-found error as for a missing
//! resource, so existence never leaks.

use super::{DomainError, ErrorCode, UserId};

/// A resource with exactly one owning user.
pub trait OwnedByUser {
    fn owner_id(&self) -> &UserId;

    /// Code reported to a caller who does not own the resource.
    fn not_found_code(&self) -> ErrorCode;

    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.owner_id() == user_id {
            return Ok(());
        }
        tracing::debug!(owner = %self.owner_id(), caller = %user_id, "foreign resource requested");
        Err(DomainError::new(self.not_found_code(), "Resource not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Wishlist(UserId);

    impl OwnedByUser for Wishlist {
        fn owner_id(&self) -> &UserId {
            &self.0
        }

        fn not_found_code(&self) -> ErrorCode {
            ErrorCode::NotFound
        }
    }

    fn wishlist_of(id: &str) -> Wishlist {
        Wishlist(UserId::new(id).unwrap())
    }

    #[test]
    fn owner_passes() {
        let list = wishlist_of("maker-1");
        assert!(list.check_ownership(&UserId::new("maker-1").unwrap()).is_ok());
    }

    #[test]
    fn stranger_sees_not_found_without_details() {
        let err = wishlist_of("maker-1")
            .check_ownership(&UserId::new("maker-2").unwrap())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.details.is_empty());
    }
}
