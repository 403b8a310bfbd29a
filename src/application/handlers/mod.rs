//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod user;
