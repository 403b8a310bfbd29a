//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter (dto / handlers / routes);
//! `router` assembles them behind the auth middleware.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod order;
pub mod router;
pub mod user;

pub use error::{error_response, status_for, ErrorResponse};
pub use extract::ApiJson;
pub use router::{storefront_router, RouterOptions, StorefrontServices};
