//! Client-side cart entry, kept by the mirror in local storage.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{derive_unit_price, line_total, Kit, ProductSnapshot};
use crate::domain::foundation::{Money, ProductId, Quantity};

use super::CartLineView;

/// A product the user has picked, with the display fields needed to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorEntry {
    pub product_id: ProductId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price_snapshot: Option<Money>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub kits: Vec<Kit>,
    pub quantity: Quantity,
    /// False when the server no longer knows the product.
    #[serde(default = "always_resolved", skip_serializing_if = "is_resolved")]
    pub resolved: bool,
}

fn always_resolved() -> bool {
    true
}

fn is_resolved(resolved: &bool) -> bool {
    *resolved
}

impl MirrorEntry {
    /// Entry for a product picked from the catalog.
    pub fn from_product(product: &ProductSnapshot, quantity: Quantity) -> Self {
        Self {
            product_id: product.id,
            display_name: product.name.clone(),
            unit_price_snapshot: product.price,
            images: product.images.clone(),
            kits: product.kits.clone(),
            quantity,
            resolved: true,
        }
    }

    /// Entry mirroring a line of the server cart.
    pub fn from_line_view(line: &CartLineView) -> Self {
        Self {
            product_id: line.product_id,
            display_name: line.name.clone().unwrap_or_default(),
            unit_price_snapshot: line.price,
            images: line.images.clone(),
            kits: line.kits.clone(),
            quantity: line.quantity,
            resolved: line.resolved,
        }
    }

    /// Derived unit price, recomputed on every call.
    pub fn unit_price(&self) -> Money {
        derive_unit_price(self.unit_price_snapshot, &self.kits)
    }

    pub fn line_total(&self) -> Money {
        line_total(self.unit_price(), self.quantity)
    }
}
