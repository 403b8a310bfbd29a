//! Identifiers for products, orders and users.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a random-UUID identifier that prints and parses as the bare UUID.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_id!(
    /// Catalog product.
    ProductId
);

uuid_id!(
    /// Placed order.
    OrderId
);

/// The `id` claim of a bearer token. Opaque, issued by the login service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn uuid_ids_round_trip_through_text_and_json() {
        let product: ProductId = RAW.parse().unwrap();
        assert_eq!(product.to_string(), RAW);

        let order: OrderId = RAW.parse().unwrap();
        assert_eq!(serde_json::to_string(&order).unwrap(), format!("\"{}\"", RAW));
        assert_eq!(order.as_uuid(), product.as_uuid());
    }

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(ProductId::new(), ProductId::new());
        assert_ne!(OrderId::default(), OrderId::default());
    }

    #[test]
    fn uuid_ids_reject_other_text() {
        assert!("kit-42".parse::<ProductId>().is_err());
        assert!(serde_json::from_str::<OrderId>("\"kit-42\"").is_err());
    }

    #[test]
    fn user_id_must_not_be_blank() {
        assert_eq!(UserId::new("64f1c0ffee").unwrap().as_str(), "64f1c0ffee");
        assert!(matches!(
            UserId::new(""),
            Err(ValidationError::EmptyField { field }) if field == "user_id"
        ));
        assert!(serde_json::from_str::<UserId>("\"  \"").is_err());
    }
}
