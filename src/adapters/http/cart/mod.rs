//! HTTP adapter for cart endpoints.
//!
//! - `GET /api/cart` - Get (or lazily create) the caller's cart
//! - `POST /api/cart/lines` - Merge-add a product
//! - `PUT /api/cart/lines/:productId` - Replace a line's quantity
//! - `DELETE /api/cart/lines/:productId` - Remove a line
//! - `DELETE /api/cart` - Empty the cart

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CartApiError, CartAppState};
pub use routes::{cart_router, cart_routes};
