//! Query parameters for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::ProductFilter;

/// Query string of `GET /api/products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
}

impl From<ProductQuery> for ProductFilter {
    fn from(query: ProductQuery) -> Self {
        ProductFilter {
            category: query.category.filter(|c| !c.trim().is_empty()),
            featured: query.featured,
        }
    }
}
