//! Cart gateway port: the cart mirror's view of the storefront backend.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartView;
use crate::domain::foundation::{DomainError, Money, ProductId, Quantity};
use crate::domain::order::{Order, ShippingAddress};

/// One priced line of a checkout submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedLine {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub price: Money,
}

/// Body of a checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub items: Vec<SubmittedLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Money>,
    pub shipping_address: ShippingAddress,
}

/// Remote cart and order operations, authenticated with a bearer token.
///
/// Errors carry the backend's code: `Unauthorized` for rejected tokens,
/// `InvalidArgument`/`NotFound` for rejected requests, `Unavailable` when
/// the backend cannot be reached.
#[async_trait]
pub trait CartGateway: Send + Sync {
    async fn fetch_cart(&self, token: &SecretString) -> Result<CartView, DomainError>;

    async fn add_line(
        &self,
        token: &SecretString,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<CartView, DomainError>;

    async fn set_line_quantity(
        &self,
        token: &SecretString,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<CartView, DomainError>;

    async fn remove_line(
        &self,
        token: &SecretString,
        product_id: &ProductId,
    ) -> Result<CartView, DomainError>;

    async fn clear(&self, token: &SecretString) -> Result<CartView, DomainError>;

    async fn place_order(
        &self,
        token: &SecretString,
        submission: &OrderSubmission,
    ) -> Result<Order, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn CartGateway) {}
    }

    #[test]
    fn submission_serializes_original_wire_names() {
        let submission = OrderSubmission {
            items: vec![SubmittedLine {
                product_id: ProductId::new(),
                quantity: Quantity::new(2).unwrap(),
                price: Money::from_units(5),
            }],
            total_amount: Some(Money::from_units(10)),
            shipping_address: ShippingAddress::default(),
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["price"], "5");
        assert_eq!(json["totalAmount"], "10");
        assert!(json["shippingAddress"].is_object());
    }
}
