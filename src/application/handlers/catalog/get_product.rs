//! GetProductHandler - Public product detail.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Product};
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

pub struct GetProductHandler {
    products: Arc<dyn ProductRepository>,
}

impl GetProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .find_by_id(&id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }
}
