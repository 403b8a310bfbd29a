//! Catalog domain module.
//!
//! Products with their kit sub-records, and the pricing rules shared by the
//! cart view, the client mirror and checkout. The cart/order core only reads
//! the catalog; administrators maintain it.

mod errors;
mod pricing;
mod product;

pub use errors::CatalogError;
pub use pricing::{derive_unit_price, line_total};
pub use product::{
    Kit, Product, ProductDetails, ProductSnapshot, DEFAULT_DIFFICULTY, DEFAULT_RATING, MAX_RATING,
};
