//! Cart domain module.
//!
//! The per-user server-side cart: product references with quantities, merged
//! on add, and joined with catalog data only when read. `MirrorEntry` is the
//! client-side counterpart kept by the cart mirror.

mod aggregate;
mod entry;
mod errors;
mod view;

pub use aggregate::{Cart, CartLine};
pub use entry::MirrorEntry;
pub use errors::CartError;
pub use view::{CartLineView, CartView, DanglingLinePolicy};
