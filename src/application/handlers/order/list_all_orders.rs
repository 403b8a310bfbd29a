//! ListAllOrdersHandler - Administrative listing of every order.

use std::sync::Arc;

use crate::domain::order::{Order, OrderError};
use crate::ports::OrderRepository;

/// Returns every order, newest first.
pub struct ListAllOrdersHandler {
    orders: Arc<dyn OrderRepository>,
}

impl ListAllOrdersHandler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn handle(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_all().await?)
    }
}
