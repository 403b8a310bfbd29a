//! Client-side adapters used by the cart mirror.
//!
//! - `HttpCartGateway` - the storefront REST API over reqwest
//! - `FileLocalCartStore` - guest cart kept as a JSON file

mod file_local_cart_store;
mod http_cart_gateway;

pub use file_local_cart_store::{FileLocalCartStore, DEFAULT_CART_FILE};
pub use http_cart_gateway::{HttpCartGateway, HttpGatewayConfig};
