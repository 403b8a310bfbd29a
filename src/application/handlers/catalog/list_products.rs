//! ListProductsHandler - Public catalog listing.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Product};
use crate::ports::{ProductFilter, ProductRepository};

pub struct ListProductsHandler {
    products: Arc<dyn ProductRepository>,
}

impl ListProductsHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(&self, filter: ProductFilter) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list(&filter).await?)
    }
}
