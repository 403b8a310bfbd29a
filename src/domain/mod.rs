//! Domain layer - storefront business logic.

pub mod cart;
pub mod catalog;
pub mod foundation;
pub mod order;
pub mod user;
