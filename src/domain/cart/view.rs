//! Denormalized cart view: stored lines joined with current catalog fields.
//!
//! Catalog fields are never persisted on the cart. They are looked up at read
//! time, so a renamed or repriced product shows its current values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{derive_unit_price, line_total, Kit, ProductSnapshot};
use crate::domain::foundation::{Money, ProductId, Quantity, Timestamp, UserId};

use super::Cart;

/// How to treat a line whose product no longer resolves in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingLinePolicy {
    /// Omit the line from the view; the stored line is removed lazily.
    #[default]
    Drop,
    /// Keep the line, flagged unresolved and priced at zero.
    MarkUnresolvable,
}

/// A cart line enriched with catalog fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: ProductId,
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub kits: Vec<Kit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    pub unit_price: Money,
    pub line_total: Money,
    pub resolved: bool,
}

impl CartLineView {
    fn resolved(quantity: Quantity, snapshot: &ProductSnapshot) -> Self {
        let unit_price = derive_unit_price(snapshot.price, &snapshot.kits);
        Self {
            product_id: snapshot.id,
            quantity,
            name: Some(snapshot.name.clone()),
            images: snapshot.images.clone(),
            kits: snapshot.kits.clone(),
            price: snapshot.price,
            unit_price,
            line_total: line_total(unit_price, quantity),
            resolved: true,
        }
    }

    fn unresolvable(product_id: ProductId, quantity: Quantity) -> Self {
        Self {
            product_id,
            quantity,
            name: None,
            images: Vec::new(),
            kits: Vec::new(),
            price: None,
            unit_price: Money::ZERO,
            line_total: Money::ZERO,
            resolved: false,
        }
    }
}

/// The cart as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub owner: UserId,
    pub lines: Vec<CartLineView>,
    pub total: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartView {
    /// Joins `cart` with resolved products.
    ///
    /// Returns the view and the product ids that did not resolve.
    pub fn build(
        cart: &Cart,
        products: &HashMap<ProductId, ProductSnapshot>,
        policy: DanglingLinePolicy,
    ) -> (Self, Vec<ProductId>) {
        let mut lines = Vec::with_capacity(cart.lines().len());
        let mut dangling = Vec::new();

        for line in cart.lines() {
            match products.get(&line.product_id) {
                Some(snapshot) => lines.push(CartLineView::resolved(line.quantity, snapshot)),
                None => {
                    dangling.push(line.product_id);
                    if policy == DanglingLinePolicy::MarkUnresolvable {
                        lines.push(CartLineView::unresolvable(line.product_id, line.quantity));
                    }
                }
            }
        }

        let total = lines.iter().map(|l| l.line_total).sum();
        let view = Self {
            owner: cart.owner().clone(),
            lines,
            total,
            created_at: *cart.created_at(),
            updated_at: *cart.updated_at(),
        };
        (view, dangling)
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLineView> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
