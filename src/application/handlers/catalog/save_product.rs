//! Administrative product maintenance: create, update and delete.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Product, ProductDetails};
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

/// Command to create a product.
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub details: ProductDetails,
}

/// Command to replace a product's editable fields.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub product_id: ProductId,
    pub details: ProductDetails,
}

/// Command to delete a product.
#[derive(Debug, Clone)]
pub struct DeleteProductCommand {
    pub product_id: ProductId,
}

/// Handler for catalog maintenance commands.
///
/// Deleting a product does not touch carts that reference it; those lines
/// are handled at read time by the dangling-line policy.
pub struct ProductAdminHandler {
    products: Arc<dyn ProductRepository>,
}

impl ProductAdminHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn create(&self, cmd: CreateProductCommand) -> Result<Product, CatalogError> {
        let product = Product::create(cmd.details)?;
        self.products.save(&product).await?;
        tracing::info!(product_id = %product.id(), name = product.name(), "product created");
        Ok(product)
    }

    pub async fn update(&self, cmd: UpdateProductCommand) -> Result<Product, CatalogError> {
        let mut product = self
            .products
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or(CatalogError::NotFound(cmd.product_id))?;

        product.update(cmd.details)?;
        self.products.update(&product).await?;
        tracing::info!(product_id = %product.id(), "product updated");
        Ok(product)
    }

    pub async fn delete(&self, cmd: DeleteProductCommand) -> Result<(), CatalogError> {
        self.products.delete(&cmd.product_id).await?;
        tracing::info!(product_id = %cmd.product_id, "product deleted");
        Ok(())
    }
}
