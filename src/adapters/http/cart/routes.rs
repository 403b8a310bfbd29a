//! Axum router configuration for cart endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{add_line, clear_cart, get_cart, remove_line, set_line_quantity, CartAppState};

/// Cart routes, every one requiring an authenticated caller.
///
/// - `GET /` - Get or create the cart
/// - `DELETE /` - Empty the cart
/// - `POST /lines` - Merge-add a product
/// - `PUT /lines/:product_id` - Replace a line's quantity
/// - `DELETE /lines/:product_id` - Remove a line
pub fn cart_routes() -> Router<CartAppState> {
    Router::new()
        .route("/", get(get_cart).delete(clear_cart))
        .route("/lines", axum::routing::post(add_line))
        .route(
            "/lines/:product_id",
            put(set_line_quantity).delete(remove_line),
        )
}

/// Cart router for mounting at `/api`.
pub fn cart_router() -> Router<CartAppState> {
    Router::new().nest("/cart", cart_routes())
}
