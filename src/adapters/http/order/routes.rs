//! Axum router configuration for order endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{
    get_order, list_all_orders, list_my_orders, place_order, update_order_status, OrderAppState,
};

/// Customer order routes.
///
/// - `GET /` - List the caller's orders
/// - `POST /` - Place an order
/// - `GET /:id` - Get one of the caller's orders
pub fn order_routes() -> Router<OrderAppState> {
    Router::new()
        .route("/", get(list_my_orders).post(place_order))
        .route("/:id", get(get_order))
}

/// Admin order routes.
///
/// - `GET /` - List every order
/// - `PATCH /:id/status` - Change an order's status
pub fn admin_order_routes() -> Router<OrderAppState> {
    Router::new()
        .route("/", get(list_all_orders))
        .route("/:id/status", patch(update_order_status))
}

/// Order router for mounting at `/api`.
pub fn order_router() -> Router<OrderAppState> {
    Router::new()
        .nest("/orders", order_routes())
        .nest("/admin/orders", admin_order_routes())
}
