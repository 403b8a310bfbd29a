//! HTTP handlers for catalog endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::error_response;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAdmin;
use crate::application::handlers::catalog::{
    CreateProductCommand, DeleteProductCommand, GetProductHandler, ListProductsHandler,
    ProductAdminHandler, UpdateProductCommand,
};
use crate::domain::catalog::{CatalogError, ProductDetails};
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

use super::dto::ProductQuery;

/// Dependencies for the catalog endpoints.
#[derive(Clone)]
pub struct CatalogAppState {
    pub products: Arc<dyn ProductRepository>,
}

impl CatalogAppState {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub fn list_products_handler(&self) -> ListProductsHandler {
        ListProductsHandler::new(self.products.clone())
    }

    pub fn get_product_handler(&self) -> GetProductHandler {
        GetProductHandler::new(self.products.clone())
    }

    pub fn admin_handler(&self) -> ProductAdminHandler {
        ProductAdminHandler::new(self.products.clone())
    }
}

/// GET /api/products - List products
pub async fn list_products(
    State(state): State<CatalogAppState>,
    Query(query): Query<ProductQuery>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let products = state.list_products_handler().handle(query.into()).await?;
    Ok(Json(products))
}

/// GET /api/products/:id - Get one product
pub async fn get_product(
    State(state): State<CatalogAppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let product = state
        .get_product_handler()
        .handle(parse_product_id(&product_id)?)
        .await?;
    Ok(Json(product))
}

/// POST /api/admin/products - Create a product
pub async fn create_product(
    State(state): State<CatalogAppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiJson(details): ApiJson<ProductDetails>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let product = state
        .admin_handler()
        .create(CreateProductCommand { details })
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/admin/products/:id - Replace a product's editable fields
pub async fn update_product(
    State(state): State<CatalogAppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(product_id): Path<String>,
    ApiJson(details): ApiJson<ProductDetails>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let cmd = UpdateProductCommand {
        product_id: parse_product_id(&product_id)?,
        details,
    };
    let product = state.admin_handler().update(cmd).await?;
    Ok(Json(product))
}

/// DELETE /api/admin/products/:id - Delete a product
pub async fn delete_product(
    State(state): State<CatalogAppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let cmd = DeleteProductCommand {
        product_id: parse_product_id(&product_id)?,
    };
    state.admin_handler().delete(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_product_id(raw: &str) -> Result<ProductId, CatalogError> {
    raw.parse().map_err(|_| CatalogError::ValidationFailed {
        field: "id".to_string(),
        message: format!("invalid product id '{}'", raw),
    })
}

/// Catalog error as an HTTP response.
#[derive(Debug)]
pub struct CatalogApiError(CatalogError);

impl From<CatalogError> for CatalogApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> Response {
        let message = match &self.0 {
            CatalogError::NotFound(_) => "Product not found".to_string(),
            other => other.to_string(),
        };
        error_response(self.0.code(), message)
    }
}
