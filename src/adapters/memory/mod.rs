//! In-memory adapters.
//!
//! Used by tests and by the server when no database is configured.

mod cart_repository;
mod local_cart_store;
mod order_repository;
mod product_repository;
mod user_repository;

pub use cart_repository::InMemoryCartRepository;
pub use local_cart_store::InMemoryLocalCartStore;
pub use order_repository::InMemoryOrderRepository;
pub use product_repository::InMemoryProductRepository;
pub use user_repository::InMemoryUserRepository;
