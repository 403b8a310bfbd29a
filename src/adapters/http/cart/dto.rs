//! Request bodies for cart endpoints.
//!
//! Quantities arrive as raw integers and are validated by the application
//! layer, so a zero or negative quantity is a 400 with a `{code, message}`
//! body rather than a deserialization rejection.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/cart/lines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Body of `PUT /api/cart/lines/:productId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_line_request_reads_camel_case() {
        let req: AddLineRequest =
            serde_json::from_str(r#"{"productId":"abc","quantity":3}"#).unwrap();
        assert_eq!(req.product_id, "abc");
        assert_eq!(req.quantity, 3);
    }

    #[test]
    fn add_line_request_defaults_quantity_to_one() {
        let req: AddLineRequest = serde_json::from_str(r#"{"productId":"abc"}"#).unwrap();
        assert_eq!(req.quantity, 1);
    }

    #[test]
    fn negative_quantity_still_deserializes() {
        let req: SetQuantityRequest = serde_json::from_str(r#"{"quantity":-2}"#).unwrap();
        assert_eq!(req.quantity, -2);
    }
}
