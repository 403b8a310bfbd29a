//! Order repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId, UserId};
use crate::domain::order::{Order, OrderStatus};

/// Repository port for Order aggregate persistence.
///
/// Orders are never deleted.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a newly placed order.
    ///
    /// # Errors
    ///
    /// - `Unavailable` on storage failure
    async fn save(&self, order: &Order) -> Result<(), DomainError>;

    /// Persist a status change, provided the stored status is still
    /// `expected`.
    ///
    /// # Errors
    ///
    /// - `OrderNotFound` if the order doesn't exist
    /// - `InvalidArgument` (field `status`) if the stored status moved on
    /// - `Unavailable` on storage failure
    async fn update(&self, order: &Order, expected: OrderStatus) -> Result<(), DomainError>;

    /// Find an order by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// All orders owned by a user, newest `placed_at` first.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Order>, DomainError>;

    /// Every order, newest `placed_at` first.
    async fn list_all(&self) -> Result<Vec<Order>, DomainError>;
}

/// Error for a status write that lost a race with another writer.
pub fn stale_status(order: &Order) -> DomainError {
    DomainError::invalid_argument(
        "status",
        format!("Order {} changed status concurrently; reload and retry", order.id()),
    )
}
