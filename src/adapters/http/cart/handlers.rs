//! HTTP handlers for cart endpoints.
//!
//! These handlers connect Axum routes to the cart command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::error_response;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::cart::{
    AddCartLineCommand, AddCartLineHandler, CartPresenter, ClearCartCommand, ClearCartHandler,
    GetCartHandler, GetCartQuery, RemoveCartLineCommand, RemoveCartLineHandler,
    SetCartLineQuantityCommand, SetCartLineQuantityHandler,
};
use crate::domain::cart::{CartError, DanglingLinePolicy};
use crate::domain::foundation::ProductId;
use crate::ports::{CartRepository, ProductRepository};

use super::dto::{AddLineRequest, SetQuantityRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies for the cart endpoints.
#[derive(Clone)]
pub struct CartAppState {
    pub carts: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub dangling_line_policy: DanglingLinePolicy,
}

impl CartAppState {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        products: Arc<dyn ProductRepository>,
        dangling_line_policy: DanglingLinePolicy,
    ) -> Self {
        Self {
            carts,
            products,
            dangling_line_policy,
        }
    }

    fn presenter(&self) -> CartPresenter {
        CartPresenter::new(
            self.carts.clone(),
            self.products.clone(),
            self.dangling_line_policy,
        )
    }

    pub fn get_cart_handler(&self) -> GetCartHandler {
        GetCartHandler::new(self.carts.clone(), self.presenter())
    }

    pub fn add_line_handler(&self) -> AddCartLineHandler {
        AddCartLineHandler::new(self.carts.clone(), self.products.clone(), self.presenter())
    }

    pub fn set_quantity_handler(&self) -> SetCartLineQuantityHandler {
        SetCartLineQuantityHandler::new(self.carts.clone(), self.presenter())
    }

    pub fn remove_line_handler(&self) -> RemoveCartLineHandler {
        RemoveCartLineHandler::new(self.carts.clone(), self.presenter())
    }

    pub fn clear_handler(&self) -> ClearCartHandler {
        ClearCartHandler::new(self.carts.clone(), self.presenter())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/cart - Get the caller's cart, creating it if absent
pub async fn get_cart(
    State(state): State<CartAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, CartApiError> {
    let view = state
        .get_cart_handler()
        .handle(GetCartQuery { user_id: user.id })
        .await?;
    Ok(Json(view))
}

/// POST /api/cart/lines - Merge-add a product into the cart
pub async fn add_line(
    State(state): State<CartAppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<AddLineRequest>,
) -> Result<impl IntoResponse, CartApiError> {
    let cmd = AddCartLineCommand {
        user_id: user.id,
        product_id: parse_product_id(&request.product_id)?,
        quantity: request.quantity,
    };
    let view = state.add_line_handler().handle(cmd).await?;
    Ok(Json(view))
}

/// PUT /api/cart/lines/:productId - Replace the quantity of an existing line
pub async fn set_line_quantity(
    State(state): State<CartAppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<String>,
    ApiJson(request): ApiJson<SetQuantityRequest>,
) -> Result<impl IntoResponse, CartApiError> {
    let cmd = SetCartLineQuantityCommand {
        user_id: user.id,
        product_id: parse_product_id(&product_id)?,
        quantity: request.quantity,
    };
    let view = state.set_quantity_handler().handle(cmd).await?;
    Ok(Json(view))
}

/// DELETE /api/cart/lines/:productId - Remove a line (no-op when absent)
pub async fn remove_line(
    State(state): State<CartAppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, CartApiError> {
    let cmd = RemoveCartLineCommand {
        user_id: user.id,
        product_id: parse_product_id(&product_id)?,
    };
    let view = state.remove_line_handler().handle(cmd).await?;
    Ok(Json(view))
}

/// DELETE /api/cart - Empty the cart
pub async fn clear_cart(
    State(state): State<CartAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, CartApiError> {
    let view = state
        .clear_handler()
        .handle(ClearCartCommand { user_id: user.id })
        .await?;
    Ok(Json(view))
}

fn parse_product_id(raw: &str) -> Result<ProductId, CartError> {
    raw.parse()
        .map_err(|_| CartError::validation("productId", format!("invalid product id '{}'", raw)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// Cart error as an HTTP response.
#[derive(Debug)]
pub struct CartApiError(CartError);

impl From<CartError> for CartApiError {
    fn from(err: CartError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CartApiError {
    fn into_response(self) -> Response {
        let message = match &self.0 {
            CartError::LineNotFound(_) => "Item not found in cart".to_string(),
            CartError::ProductNotFound(_) => "Product not found".to_string(),
            other => other.to_string(),
        };
        error_response(self.0.code(), message)
    }
}
