//! Client-side cart mirror.
//!
//! Reconciles the guest cart kept on the device with the authenticated
//! server cart.

mod cart_mirror;
mod errors;

pub use cart_mirror::{CartMirror, LoginCartPolicy};
pub use errors::MirrorError;
