//! Request bodies for order endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::ShippingAddress;

/// One submitted line: product reference, quantity and the unit price the
/// client displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
    pub price: Decimal,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub shipping_address: ShippingAddress,
}

/// Body of `PATCH /api/admin/orders/:id/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}
