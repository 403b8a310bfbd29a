//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the storefront domain.

mod auth;
mod errors;
mod ids;
mod money;
mod ownership;
mod quantity;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{OrderId, ProductId, UserId};
pub use money::Money;
pub use ownership::OwnedByUser;
pub use quantity::{Quantity, MAX_QUANTITY};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
