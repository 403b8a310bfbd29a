//! Product aggregate and its kit sub-records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, ProductId, Timestamp, ValidationError};

use super::pricing::derive_unit_price;

/// Difficulty assigned when a product does not specify one.
pub const DEFAULT_DIFFICULTY: &str = "Intermediate";

/// Rating assigned when a product does not specify one.
pub const DEFAULT_RATING: f64 = 4.5;

/// Maximum rating value.
pub const MAX_RATING: f64 = 5.0;

/// A purchasable kit variant of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kit {
    pub kit_name: String,
    pub kit_description: String,
    #[serde(default)]
    pub kit_price: Money,
}

impl Kit {
    /// Creates a kit, validating that name and description are present.
    pub fn new(
        kit_name: impl Into<String>,
        kit_description: impl Into<String>,
        kit_price: Money,
    ) -> Result<Self, ValidationError> {
        let kit = Self {
            kit_name: kit_name.into(),
            kit_description: kit_description.into(),
            kit_price,
        };
        kit.validate(0)?;
        Ok(kit)
    }

    fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.kit_name.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("kits[{}].kitName", index)));
        }
        if self.kit_description.trim().is_empty() {
            return Err(ValidationError::empty_field(format!(
                "kits[{}].kitDescription",
                index
            )));
        }
        Ok(())
    }
}

/// Editable product fields, as submitted by an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub name: String,
    pub detail: String,
    pub category: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default)]
    pub kits: Vec<Kit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

fn default_rating() -> f64 {
    DEFAULT_RATING
}

impl ProductDetails {
    /// Creates details with defaults for every optional field.
    pub fn new(
        name: impl Into<String>,
        detail: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
            category: category.into(),
            difficulty: default_difficulty(),
            rating: DEFAULT_RATING,
            featured: false,
            images: Vec::new(),
            video: None,
            kits: Vec::new(),
            price: None,
        }
    }

    /// Builder: attach kits.
    pub fn with_kits(mut self, kits: Vec<Kit>) -> Self {
        self.kits = kits;
        self
    }

    /// Builder: set an explicit price.
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// Builder: attach image URLs.
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Validates required fields, rating range, and every kit.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if self.detail.trim().is_empty() {
            return Err(ValidationError::empty_field("detail"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::empty_field("category"));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::invalid_format(
                "rating",
                format!("must be between 0 and {}", MAX_RATING),
            ));
        }
        for (index, kit) in self.kits.iter().enumerate() {
            kit.validate(index)?;
        }
        Ok(())
    }
}

/// The fields the cart core needs from a product: what `resolveProduct` returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub images: Vec<String>,
    pub kits: Vec<Kit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

impl ProductSnapshot {
    /// Unit price derived from the explicit price or the kits.
    pub fn unit_price(&self) -> Money {
        derive_unit_price(self.price, &self.kits)
    }
}

/// Catalog product.
///
/// # Invariants
///
/// - `name`, `detail`, `category` are non-empty
/// - every kit has a name and description, and a non-negative price
/// - `rating` is within 0..=5
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    #[serde(flatten)]
    details: ProductDetails,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Product {
    /// Creates a new product with a fresh id.
    pub fn create(details: ProductDetails) -> Result<Self, ValidationError> {
        details.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id: ProductId::new(),
            details,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a product from persistence (no validation).
    pub fn reconstitute(
        id: ProductId,
        details: ProductDetails,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            details,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn category(&self) -> &str {
        &self.details.category
    }

    pub fn is_featured(&self) -> bool {
        self.details.featured
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Replaces every editable field.
    pub fn update(&mut self, details: ProductDetails) -> Result<(), ValidationError> {
        details.validate()?;
        self.details = details;
        self.updated_at = self.updated_at.advance_from(Timestamp::now());
        Ok(())
    }

    /// Unit price derived from the explicit price or the kits.
    pub fn unit_price(&self) -> Money {
        derive_unit_price(self.details.price, &self.details.kits)
    }

    /// Projection used for cart denormalization.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            name: self.details.name.clone(),
            images: self.details.images.clone(),
            kits: self.details.kits.clone(),
            price: self.details.price,
        }
    }
}
