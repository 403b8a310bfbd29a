//! GetOrderHandler - Query handler for a single order of the caller.

use std::sync::Arc;

use crate::domain::foundation::{OrderId, OwnedByUser, UserId};
use crate::domain::order::{Order, OrderError};
use crate::ports::OrderRepository;

#[derive(Debug, Clone)]
pub struct GetOrderQuery {
    pub user_id: UserId,
    pub order_id: OrderId,
}

/// Returns the order only to its owner. Anyone else gets `NotFound`.
pub struct GetOrderHandler {
    orders: Arc<dyn OrderRepository>,
}

impl GetOrderHandler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn handle(&self, query: GetOrderQuery) -> Result<Order, OrderError> {
        let order = self
            .orders
            .find_by_id(&query.order_id)
            .await?
            .ok_or(OrderError::NotFound(query.order_id))?;

        order
            .check_ownership(&query.user_id)
            .map_err(|_| OrderError::NotFound(query.order_id))?;

        Ok(order)
    }
}
