//! Local cart store port: where the mirror keeps the guest cart.

use async_trait::async_trait;

use crate::domain::cart::MirrorEntry;
use crate::domain::foundation::DomainError;

/// Persistence for the guest cart on the user's device.
#[async_trait]
pub trait LocalCartStore: Send + Sync {
    /// Loads the saved entries; an absent record yields an empty list.
    async fn load(&self) -> Result<Vec<MirrorEntry>, DomainError>;

    /// Replaces the saved entries.
    async fn save(&self, entries: &[MirrorEntry]) -> Result<(), DomainError>;

    /// Removes the saved record entirely.
    async fn remove(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_cart_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn LocalCartStore) {}
    }
}
