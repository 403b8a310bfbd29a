//! PlaceOrderHandler - Command handler turning a checkout into an order.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::foundation::{Money, ProductId, Quantity, UserId};
use crate::domain::order::{Order, OrderError, OrderLine, ShippingAddress};
use crate::ports::{CartRepository, OrderRepository};

/// One submitted line, unvalidated.
#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub product_id: ProductId,
    pub quantity: i64,
    pub price: Decimal,
}

/// Command to place an order from the caller's checkout.
#[derive(Debug, Clone)]
pub struct PlaceOrderCommand {
    pub user_id: UserId,
    pub items: Vec<OrderItemInput>,
    /// Total as computed by the client; checked against the server total.
    pub total_amount: Option<Decimal>,
    pub shipping_address: ShippingAddress,
}

/// Handler for placing orders.
///
/// After the order is persisted the user's cart is cleared. That clear is
/// best effort: its failure is logged and the order still succeeds.
pub struct PlaceOrderHandler {
    orders: Arc<dyn OrderRepository>,
    carts: Arc<dyn CartRepository>,
}

impl PlaceOrderHandler {
    pub fn new(orders: Arc<dyn OrderRepository>, carts: Arc<dyn CartRepository>) -> Self {
        Self { orders, carts }
    }

    pub async fn handle(&self, cmd: PlaceOrderCommand) -> Result<Order, OrderError> {
        let lines = cmd
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| to_order_line(index, item))
            .collect::<Result<Vec<_>, _>>()?;
        let claimed_total = cmd
            .total_amount
            .map(|total| {
                Money::new(total).map_err(|e| OrderError::validation("totalAmount", e.to_string()))
            })
            .transpose()?;

        let order = Order::place(
            cmd.user_id.clone(),
            lines,
            claimed_total,
            cmd.shipping_address,
        )?;

        self.orders.save(&order).await?;
        tracing::info!(
            order_id = %order.id(),
            owner = %order.owner(),
            total = %order.total_amount(),
            lines = order.lines().len(),
            "order placed"
        );

        if let Err(err) = self.carts.clear(&cmd.user_id).await {
            tracing::warn!(
                order_id = %order.id(),
                owner = %cmd.user_id,
                error = %err,
                "order placed but cart could not be cleared"
            );
        }

        Ok(order)
    }
}

fn to_order_line(index: usize, item: &OrderItemInput) -> Result<OrderLine, OrderError> {
    let quantity = Quantity::new(item.quantity)
        .map_err(|e| OrderError::validation(format!("items[{}].quantity", index), e.to_string()))?;
    let price = Money::new(item.price)
        .map_err(|e| OrderError::validation(format!("items[{}].price", index), e.to_string()))?;
    Ok(OrderLine::new(item.product_id, quantity, price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCartRepository, InMemoryOrderRepository};
    use std::str::FromStr;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Asha Rao".into(),
            address_line1: "12 Workshop Lane".into(),
            address_line2: None,
            city: "Pune".into(),
            state: "MH".into(),
            pincode: "411001".into(),
            phone: "9800000000".into(),
        }
    }

    fn item(product_id: ProductId, quantity: i64, price: &str) -> OrderItemInput {
        OrderItemInput {
            product_id,
            quantity,
            price: Decimal::from_str(price).unwrap(),
        }
    }

    struct Fixture {
        handler: PlaceOrderHandler,
        orders: Arc<InMemoryOrderRepository>,
        carts: Arc<InMemoryCartRepository>,
    }

    fn fixture() -> Fixture {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let carts = Arc::new(InMemoryCartRepository::new());
        Fixture {
            handler: PlaceOrderHandler::new(orders.clone(), carts.clone()),
            orders,
            carts,
        }
    }

    fn cmd(items: Vec<OrderItemInput>, total: Option<&str>) -> PlaceOrderCommand {
        PlaceOrderCommand {
            user_id: user(),
            items,
            total_amount: total.map(|t| Decimal::from_str(t).unwrap()),
            shipping_address: address(),
        }
    }

    #[tokio::test]
    async fn places_order_and_clears_cart() {
        let f = fixture();
        let product = ProductId::new();
        f.carts.add_line(&user(), &product, Quantity::new(2).unwrap()).await.unwrap();

        let order = f
            .handler
            .handle(cmd(vec![item(product, 2, "19.99")], Some("39.98")))
            .await
            .unwrap();

        assert_eq!(order.total_amount().amount(), Decimal::from_str("39.98").unwrap());
        assert_eq!(f.orders.count().await, 1);
        assert!(f.carts.peek(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_order_fails_and_persists_nothing() {
        let f = fixture();
        let err = f.handler.handle(cmd(vec![], None)).await.unwrap_err();
        assert!(matches!(err, OrderError::ValidationFailed { ref message, .. } if message.contains("empty order")));
        assert_eq!(f.orders.count().await, 0);
    }

    #[tokio::test]
    async fn mismatched_total_is_rejected() {
        let f = fixture();
        let err = f
            .handler
            .handle(cmd(vec![item(ProductId::new(), 1, "10")], Some("5")))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::ValidationFailed { ref field, .. } if field == "totalAmount"));
        assert_eq!(f.orders.count().await, 0);
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let f = fixture();
        let err = f
            .handler
            .handle(cmd(vec![item(ProductId::new(), 1, "-1")], None))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::ValidationFailed { ref field, .. } if field == "items[0].price"));
    }

    #[tokio::test]
    async fn failed_cart_clear_still_places_order() {
        let f = fixture();
        let product = ProductId::new();
        f.carts.add_line(&user(), &product, Quantity::ONE).await.unwrap();
        f.carts.fail_clear(true);

        let order = f
            .handler
            .handle(cmd(vec![item(product, 1, "5")], None))
            .await
            .unwrap();

        let listed = f.orders.find_by_owner(&user()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), order.id());
        assert!(f.carts.peek(&user()).await.unwrap().line(&product).is_some());
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_infrastructure() {
        let f = fixture();
        f.orders.set_unavailable(true);
        let err = f
            .handler
            .handle(cmd(vec![item(ProductId::new(), 1, "5")], None))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Infrastructure(_)));
    }
}
