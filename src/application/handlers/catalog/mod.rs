//! Catalog command and query handlers.

mod get_product;
mod list_products;
mod save_product;

pub use get_product::GetProductHandler;
pub use list_products::ListProductsHandler;
pub use save_product::{
    CreateProductCommand, DeleteProductCommand, ProductAdminHandler, UpdateProductCommand,
};
