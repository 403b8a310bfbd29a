//! Cart command and query handlers.

mod add_cart_line;
mod clear_cart;
mod get_cart;
mod present_cart;
mod remove_cart_line;
mod set_cart_line_quantity;

pub use add_cart_line::{AddCartLineCommand, AddCartLineHandler};
pub use clear_cart::{ClearCartCommand, ClearCartHandler};
pub use get_cart::{GetCartHandler, GetCartQuery};
pub use present_cart::CartPresenter;
pub use remove_cart_line::{RemoveCartLineCommand, RemoveCartLineHandler};
pub use set_cart_line_quantity::{SetCartLineQuantityCommand, SetCartLineQuantityHandler};
