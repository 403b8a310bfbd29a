//! UpdateOrderStatusHandler - Administrative status change.

use std::sync::Arc;

use crate::domain::foundation::OrderId;
use crate::domain::order::{Order, OrderError, OrderStatus, StatusTransitionPolicy};
use crate::ports::OrderRepository;

#[derive(Debug, Clone)]
pub struct UpdateOrderStatusCommand {
    pub order_id: OrderId,
    /// Raw status value as submitted.
    pub status: String,
}

pub struct UpdateOrderStatusHandler {
    orders: Arc<dyn OrderRepository>,
    policy: StatusTransitionPolicy,
}

impl UpdateOrderStatusHandler {
    pub fn new(orders: Arc<dyn OrderRepository>, policy: StatusTransitionPolicy) -> Self {
        Self { orders, policy }
    }

    pub async fn handle(&self, cmd: UpdateOrderStatusCommand) -> Result<Order, OrderError> {
        let new_status: OrderStatus = cmd.status.parse()?;

        let mut order = self
            .orders
            .find_by_id(&cmd.order_id)
            .await?
            .ok_or(OrderError::NotFound(cmd.order_id))?;

        let previous = order.status();
        order.update_status(new_status, self.policy)?;
        self.orders.update(&order, previous).await?;

        tracing::info!(
            order_id = %cmd.order_id,
            from = %previous,
            to = %new_status,
            "order status updated"
        );
        Ok(order)
    }
}
