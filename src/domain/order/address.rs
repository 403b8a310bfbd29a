//! Shipping address captured with an order.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Where an order is delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub phone: String,
}

impl ShippingAddress {
    /// Checks that every required field is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("shippingAddress.fullName", &self.full_name),
            ("shippingAddress.addressLine1", &self.address_line1),
            ("shippingAddress.city", &self.city),
            ("shippingAddress.pincode", &self.pincode),
            ("shippingAddress.phone", &self.phone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::empty_field(field));
            }
        }
        Ok(())
    }
}
