//! PostgreSQL implementation of ProductRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::catalog::{Kit, Product, ProductDetails, ProductSnapshot};
use crate::domain::foundation::{DomainError, ErrorCode, Money, ProductId, Timestamp};
use crate::ports::{ProductFilter, ProductRepository};

use super::{corrupt_row, db_error};

const SELECT_PRODUCT: &str = r#"
    SELECT id, name, detail, category, difficulty, rating, featured, images,
           video, kits, price, created_at, updated_at
    FROM products
"#;

/// PostgreSQL implementation of ProductRepository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a new PostgresProductRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn resolve(&self, id: &ProductId) -> Result<Option<ProductSnapshot>, DomainError> {
        let row = sqlx::query("SELECT id, name, images, kits, price FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to resolve product", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: Uuid = row
            .try_get("id")
            .map_err(|e| corrupt_row("Failed to get id", e))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| corrupt_row("Failed to get name", e))?;
        let images: Vec<String> = row
            .try_get("images")
            .map_err(|e| corrupt_row("Failed to get images", e))?;
        let Json(kits): Json<Vec<Kit>> = row
            .try_get("kits")
            .map_err(|e| corrupt_row("Failed to get kits", e))?;
        let price: Option<Decimal> = row
            .try_get("price")
            .map_err(|e| corrupt_row("Failed to get price", e))?;

        Ok(Some(ProductSnapshot {
            id: ProductId::from_uuid(id),
            name,
            images,
            kits,
            price: to_money(price)?,
        }))
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_PRODUCT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch product", e))?;

        row.map(row_to_product).transpose()
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError> {
        // NULL parameters disable their predicate.
        let rows = sqlx::query(&format!(
            r#"{}
            WHERE ($1::TEXT IS NULL OR category = $1)
              AND ($2::BOOLEAN IS NULL OR featured = $2)
            ORDER BY created_at DESC"#,
            SELECT_PRODUCT
        ))
        .bind(filter.category.as_deref())
        .bind(filter.featured)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list products", e))?;

        rows.into_iter().map(row_to_product).collect()
    }

    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        let details = product.details();
        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, detail, category, difficulty, rating, featured, images,
                video, kits, price, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(&details.name)
        .bind(&details.detail)
        .bind(&details.category)
        .bind(&details.difficulty)
        .bind(details.rating)
        .bind(details.featured)
        .bind(&details.images)
        .bind(details.video.as_deref())
        .bind(Json(&details.kits))
        .bind(details.price.map(|price| price.amount()))
        .bind(product.created_at().as_datetime())
        .bind(product.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert product", e))?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let details = product.details();
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                detail = $3,
                category = $4,
                difficulty = $5,
                rating = $6,
                featured = $7,
                images = $8,
                video = $9,
                kits = $10,
                price = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(&details.name)
        .bind(&details.detail)
        .bind(&details.category)
        .bind(&details.difficulty)
        .bind(details.rating)
        .bind(details.featured)
        .bind(&details.images)
        .bind(details.video.as_deref())
        .bind(Json(&details.kits))
        .bind(details.price.map(|price| price.amount()))
        .bind(product.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update product", e))?;

        if result.rows_affected() == 0 {
            return Err(product_not_found(product.id()));
        }

        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete product", e))?;

        if result.rows_affected() == 0 {
            return Err(product_not_found(id));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn product_not_found(id: &ProductId) -> DomainError {
    DomainError::new(ErrorCode::ProductNotFound, "Product not found")
        .with_detail("product_id", id.to_string())
}

fn to_money(price: Option<Decimal>) -> Result<Option<Money>, DomainError> {
    price
        .map(Money::new)
        .transpose()
        .map_err(|e| corrupt_row("Invalid stored price", e))
}

fn row_to_product(row: sqlx::postgres::PgRow) -> Result<Product, DomainError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| corrupt_row("Failed to get id", e))?;
    let Json(kits): Json<Vec<Kit>> = row
        .try_get("kits")
        .map_err(|e| corrupt_row("Failed to get kits", e))?;
    let price: Option<Decimal> = row
        .try_get("price")
        .map_err(|e| corrupt_row("Failed to get price", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| corrupt_row("Failed to get created_at", e))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| corrupt_row("Failed to get updated_at", e))?;

    let details = ProductDetails {
        name: row
            .try_get("name")
            .map_err(|e| corrupt_row("Failed to get name", e))?,
        detail: row
            .try_get("detail")
            .map_err(|e| corrupt_row("Failed to get detail", e))?,
        category: row
            .try_get("category")
            .map_err(|e| corrupt_row("Failed to get category", e))?,
        difficulty: row
            .try_get("difficulty")
            .map_err(|e| corrupt_row("Failed to get difficulty", e))?,
        rating: row
            .try_get("rating")
            .map_err(|e| corrupt_row("Failed to get rating", e))?,
        featured: row
            .try_get("featured")
            .map_err(|e| corrupt_row("Failed to get featured", e))?,
        images: row
            .try_get("images")
            .map_err(|e| corrupt_row("Failed to get images", e))?,
        video: row
            .try_get("video")
            .map_err(|e| corrupt_row("Failed to get video", e))?,
        kits,
        price: to_money(price)?,
    };

    Ok(Product::reconstitute(
        ProductId::from_uuid(id),
        details,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_product_id() {
        let id = ProductId::new();
        let err = product_not_found(&id);

        assert_eq!(err.code, ErrorCode::ProductNotFound);
        assert_eq!(err.details.get("product_id"), Some(&id.to_string()));
    }

    #[test]
    fn stored_price_converts_to_money() {
        assert_eq!(to_money(None).unwrap(), None);
        assert_eq!(
            to_money(Some(Decimal::new(1250, 2))).unwrap(),
            Some(Money::new(Decimal::new(1250, 2)).unwrap())
        );
        assert_eq!(
            to_money(Some(Decimal::new(-1, 0))).unwrap_err().code,
            ErrorCode::InternalError
        );
    }
}
