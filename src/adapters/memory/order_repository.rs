//! In-memory order repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, UserId};
use crate::domain::order::{Order, OrderStatus};
use crate::ports::{stale_status, OrderRepository};

/// In-memory storage for orders.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation fail with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored orders.
    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("order store unavailable"));
        }
        Ok(())
    }
}

fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.placed_at().cmp(a.placed_at()));
    orders
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        self.check_available()?;
        self.orders.write().await.insert(*order.id(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order, expected: OrderStatus) -> Result<(), DomainError> {
        self.check_available()?;
        let mut orders = self.orders.write().await;
        match orders.get_mut(order.id()) {
            Some(stored) if stored.status() != expected => Err(stale_status(order)),
            Some(stored) => {
                *stored = order.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found")),
        }
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        self.check_available()?;
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Order>, DomainError> {
        self.check_available()?;
        let orders = self.orders.read().await;
        Ok(newest_first(
            orders
                .values()
                .filter(|o| o.owner() == owner)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<Order>, DomainError> {
        self.check_available()?;
        Ok(newest_first(self.orders.read().await.values().cloned().collect()))
    }
}
