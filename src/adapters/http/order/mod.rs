//! HTTP adapter for order endpoints.
//!
//! - `POST /api/orders` - Place an order (201)
//! - `GET /api/orders` - The caller's orders, newest first
//! - `GET /api/orders/:id` - One of the caller's orders
//! - `GET /api/admin/orders` - Every order (admin)
//! - `PATCH /api/admin/orders/:id/status` - Change an order's status (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{OrderApiError, OrderAppState};
pub use routes::{admin_order_routes, order_router, order_routes};
