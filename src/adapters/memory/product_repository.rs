//! In-memory product catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::{Product, ProductSnapshot};
use crate::domain::foundation::{DomainError, ErrorCode, ProductId};
use crate::ports::{ProductFilter, ProductRepository};

/// In-memory storage for products.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-loaded with products.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products.into_iter().map(|p| (*p.id(), p)).collect();
        Self {
            products: Arc::new(RwLock::new(map)),
        }
    }
}

fn not_found(id: &ProductId) -> DomainError {
    DomainError::new(ErrorCode::ProductNotFound, "Product not found")
        .with_detail("product_id", id.to_string())
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn resolve(&self, id: &ProductId) -> Result<Option<ProductSnapshot>, DomainError> {
        Ok(self.products.read().await.get(id).map(Product::snapshot))
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().await;
        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(matching)
    }

    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        self.products
            .write()
            .await
            .insert(*product.id(), product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut products = self.products.write().await;
        match products.get_mut(product.id()) {
            Some(stored) => {
                *stored = product.clone();
                Ok(())
            }
            None => Err(not_found(product.id())),
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        self.products
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ProductDetails;

    fn product(name: &str, category: &str) -> Product {
        Product::create(ProductDetails::new(name, "detail", category)).unwrap()
    }

    #[tokio::test]
    async fn resolve_returns_snapshot_until_deleted() {
        let lamp = product("Lamp", "Lighting");
        let repo = InMemoryProductRepository::with_products([lamp.clone()]);

        let snapshot = repo.resolve(lamp.id()).await.unwrap().unwrap();
        assert_eq!(snapshot.name, "Lamp");

        repo.delete(lamp.id()).await.unwrap();
        assert!(repo.resolve(lamp.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_applies_filter() {
        let repo = InMemoryProductRepository::with_products([
            product("Lamp", "Lighting"),
            product("Robot", "Robotics"),
        ]);
        let filter = ProductFilter {
            category: Some("Robotics".into()),
            featured: None,
        };
        let found = repo.list(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Robot");
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let err = repo.delete(&ProductId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }
}
