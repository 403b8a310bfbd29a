//! Order domain module.
//!
//! Immutable purchase records created at checkout, with an administratively
//! managed fulfilment status.

mod address;
mod aggregate;
mod errors;
mod status;

pub use address::ShippingAddress;
pub use aggregate::{Order, OrderLine};
pub use errors::OrderError;
pub use status::{OrderStatus, PaymentMethod, StatusTransitionPolicy};
