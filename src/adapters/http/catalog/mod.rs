//! HTTP adapter for catalog endpoints.
//!
//! - `GET /api/products` - List products, filtered by `category` / `featured`
//! - `GET /api/products/:id` - Get one product
//! - `POST /api/admin/products` - Create a product (admin, 201)
//! - `PUT /api/admin/products/:id` - Replace a product's fields (admin)
//! - `DELETE /api/admin/products/:id` - Delete a product (admin, 204)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CatalogApiError, CatalogAppState};
pub use routes::{admin_product_routes, catalog_router, product_routes};
