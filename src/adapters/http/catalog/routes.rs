//! Axum router configuration for catalog endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    create_product, delete_product, get_product, list_products, update_product, CatalogAppState,
};

/// Public product routes.
pub fn product_routes() -> Router<CatalogAppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
}

/// Admin product routes.
pub fn admin_product_routes() -> Router<CatalogAppState> {
    Router::new()
        .route("/", post(create_product))
        .route("/:id", put(update_product).delete(delete_product))
}

/// Catalog router for mounting at `/api`.
pub fn catalog_router() -> Router<CatalogAppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/admin/products", admin_product_routes())
}
