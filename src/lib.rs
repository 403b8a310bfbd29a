//! Craft Haven - storefront backend for DIY kits.
//!
//! Catalog browsing, per-user server carts, cash-on-delivery checkout with
//! admin-managed order status, a user directory, and a client-side cart
//! mirror that keeps a guest cart locally and defers to the server cart once
//! signed in.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
