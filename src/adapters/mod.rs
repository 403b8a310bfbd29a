//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - bearer token validation (JWT, mock)
//! - `client` - cart mirror gateway and local storage
//! - `http` - axum REST API
//! - `memory` - in-memory repositories
//! - `postgres` - PostgreSQL repositories

pub mod auth;
pub mod client;
pub mod http;
pub mod memory;
pub mod postgres;
