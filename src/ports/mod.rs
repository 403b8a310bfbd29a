//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Server-side ports
//!
//! - `CartRepository` - per-user cart persistence with atomic merge-add
//! - `OrderRepository` - order persistence
//! - `ProductRepository` - catalog lookups and maintenance
//! - `SessionValidator` - bearer credential validation
//! - `UserRepository` - user directory profiles
//!
//! ## Client-side ports (cart mirror)
//!
//! - `CartGateway` - remote cart and checkout calls
//! - `LocalCartStore` - guest cart persistence on the device

mod cart_gateway;
mod cart_repository;
mod local_cart_store;
mod order_repository;
mod product_repository;
mod session_validator;
mod user_repository;

pub use cart_gateway::{CartGateway, OrderSubmission, SubmittedLine};
pub use cart_repository::CartRepository;
pub use local_cart_store::LocalCartStore;
pub use order_repository::{stale_status, OrderRepository};
pub use product_repository::{ProductFilter, ProductRepository};
pub use session_validator::SessionValidator;
pub use user_repository::{user_not_found, UserFilter, UserRepository};
