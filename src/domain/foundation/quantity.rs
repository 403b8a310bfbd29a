//! Quantity value object: a positive item count.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Largest quantity a single line may hold (fits a Postgres INTEGER).
pub const MAX_QUANTITY: u32 = i32::MAX as u32;

/// Positive item count (≥ 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest valid quantity.
    pub const ONE: Quantity = Quantity(1);

    /// Creates a quantity, rejecting values below 1 or above `MAX_QUANTITY`.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 1 || value > i64::from(MAX_QUANTITY) {
            return Err(ValidationError::out_of_range(
                "quantity",
                1,
                i64::from(MAX_QUANTITY),
                value,
            ));
        }
        Ok(Self(value as u32))
    }

    /// Returns the raw count.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Adds two quantities (merge-add), failing on overflow.
    pub fn checked_add(self, other: Quantity) -> Result<Quantity, ValidationError> {
        Quantity::new(i64::from(self.0) + i64::from(other.0))
    }

    /// Lowers the quantity by one; `None` when the result would be zero.
    pub fn decremented(self) -> Option<Quantity> {
        Quantity::new(i64::from(self.0) - 1).ok()
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
