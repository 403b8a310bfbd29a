//! ListUserOrdersHandler - Query handler for the caller's order history.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::order::{Order, OrderError};
use crate::ports::OrderRepository;

#[derive(Debug, Clone)]
pub struct ListUserOrdersQuery {
    pub user_id: UserId,
}

/// Returns the caller's orders, newest first.
pub struct ListUserOrdersHandler {
    orders: Arc<dyn OrderRepository>,
}

impl ListUserOrdersHandler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn handle(&self, query: ListUserOrdersQuery) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.find_by_owner(&query.user_id).await?)
    }
}
