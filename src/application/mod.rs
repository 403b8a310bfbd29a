//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) live under `handlers`;
//! `mirror` holds the client-side cart mirror.

pub mod handlers;
pub mod mirror;

pub use mirror::{CartMirror, LoginCartPolicy, MirrorError};
