//! In-memory cart repository.
//!
//! Every mutation runs under a single write lock, which makes the
//! merge-increment of `add_line` atomic.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cart::Cart;
use crate::domain::foundation::{DomainError, ProductId, Quantity, UserId};
use crate::ports::CartRepository;

/// In-memory storage for carts, keyed by owner.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartRepository {
    carts: Arc<RwLock<HashMap<UserId, Cart>>>,
    fail_clear: Arc<AtomicBool>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `clear` fail with `Unavailable`.
    pub fn fail_clear(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }

    /// Makes every operation fail with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Returns the stored cart without creating one.
    pub async fn peek(&self, owner: &UserId) -> Option<Cart> {
        self.carts.read().await.get(owner).cloned()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("cart store unavailable"));
        }
        Ok(())
    }

    async fn mutate<F>(&self, owner: &UserId, f: F) -> Result<Cart, DomainError>
    where
        F: FnOnce(&mut Cart) -> Result<(), DomainError> + Send,
    {
        self.check_available()?;
        let mut carts = self.carts.write().await;
        let cart = carts
            .entry(owner.clone())
            .or_insert_with(|| Cart::new(owner.clone()));
        let mut updated = cart.clone();
        f(&mut updated)?;
        *cart = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find_or_create(&self, owner: &UserId) -> Result<Cart, DomainError> {
        self.mutate(owner, |_| Ok(())).await
    }

    async fn add_line(
        &self,
        owner: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<Cart, DomainError> {
        let product_id = *product_id;
        self.mutate(owner, move |cart| cart.add_line(product_id, quantity))
            .await
    }

    async fn set_line_quantity(
        &self,
        owner: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<Cart, DomainError> {
        self.mutate(owner, |cart| cart.set_line_quantity(product_id, quantity))
            .await
    }

    async fn remove_lines(
        &self,
        owner: &UserId,
        product_ids: &[ProductId],
    ) -> Result<Cart, DomainError> {
        self.mutate(owner, |cart| {
            cart.remove_lines(product_ids);
            Ok(())
        })
        .await
    }

    async fn clear(&self, owner: &UserId) -> Result<Cart, DomainError> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("simulated clear failure"));
        }
        self.mutate(owner, |cart| {
            cart.clear();
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[tokio::test]
    async fn find_or_create_creates_once() {
        let repo = InMemoryCartRepository::new();
        let first = repo.find_or_create(&user()).await.unwrap();
        let second = repo.find_or_create(&user()).await.unwrap();
        assert_eq!(first.created_at(), second.created_at());
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn concurrent_adds_are_all_counted() {
        let repo = InMemoryCartRepository::new();
        let product = ProductId::new();

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.add_line(&user(), &product, Quantity::ONE).await.unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let cart = repo.find_or_create(&user()).await.unwrap();
        assert_eq!(cart.line(&product).unwrap().quantity.get(), 50);
    }

    #[tokio::test]
    async fn failed_set_leaves_cart_unchanged() {
        let repo = InMemoryCartRepository::new();
        let err = repo
            .set_line_quantity(&user(), &ProductId::new(), Quantity::ONE)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartLineNotFound);
        assert!(repo.peek(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fail_clear_keeps_lines() {
        let repo = InMemoryCartRepository::new();
        let product = ProductId::new();
        repo.add_line(&user(), &product, Quantity::ONE).await.unwrap();
        repo.fail_clear(true);

        let err = repo.clear(&user()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Unavailable);
        assert!(repo.peek(&user()).await.unwrap().line(&product).is_some());
    }

    #[tokio::test]
    async fn unavailable_store_rejects_reads() {
        let repo = InMemoryCartRepository::new();
        repo.set_unavailable(true);
        let err = repo.find_or_create(&user()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unavailable);
    }
}
