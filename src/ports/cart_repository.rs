//! Cart repository port.
//!
//! Every operation works on the caller's single cart and creates it lazily
//! when it does not exist yet. Each method returns the cart as stored after
//! the operation.

use async_trait::async_trait;

use crate::domain::cart::Cart;
use crate::domain::foundation::{DomainError, ProductId, Quantity, UserId};

/// Repository port for the Cart aggregate.
///
/// Implementations must perform `add_line` as one atomic merge-increment:
/// two concurrent adds of the same product must both be counted.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Returns the user's cart, creating an empty one if absent.
    ///
    /// # Errors
    ///
    /// - `Unavailable` on storage failure
    async fn find_or_create(&self, owner: &UserId) -> Result<Cart, DomainError>;

    /// Adds `quantity` to the line for `product_id`, appending it if absent.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the merged quantity overflows
    /// - `Unavailable` on storage failure
    async fn add_line(
        &self,
        owner: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<Cart, DomainError>;

    /// Replaces the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// - `CartLineNotFound` if the cart has no line for `product_id`
    /// - `Unavailable` on storage failure
    async fn set_line_quantity(
        &self,
        owner: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<Cart, DomainError>;

    /// Removes the lines for the given products. Absent lines are ignored.
    async fn remove_lines(
        &self,
        owner: &UserId,
        product_ids: &[ProductId],
    ) -> Result<Cart, DomainError>;

    /// Empties the cart, keeping the cart record.
    async fn clear(&self, owner: &UserId) -> Result<Cart, DomainError>;
}
