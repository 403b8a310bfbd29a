//! Product catalog port.
//!
//! The cart and order core only calls `resolve`. The remaining methods back
//! the catalog endpoints.

use async_trait::async_trait;

use crate::domain::catalog::{Product, ProductSnapshot};
use crate::domain::foundation::{DomainError, ProductId};

/// Optional filters for listing products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.category
            .as_deref()
            .map_or(true, |category| product.category() == category)
            && self
                .featured
                .map_or(true, |featured| product.is_featured() == featured)
    }
}

/// Repository port for catalog products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Looks up the fields needed to denormalize a cart line.
    ///
    /// Returns `None` if the product does not exist.
    async fn resolve(&self, id: &ProductId) -> Result<Option<ProductSnapshot>, DomainError>;

    /// Find a full product by ID.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// List products matching the filter, newest first.
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError>;

    /// Persist a new product.
    async fn save(&self, product: &Product) -> Result<(), DomainError>;

    /// Persist changes to an existing product.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    async fn delete(&self, id: &ProductId) -> Result<(), DomainError>;
}
