//! PostgreSQL implementation of CartRepository.
//!
//! Each mutation runs in one transaction: ensure the cart row, change the
//! lines, bump `updated_at`, then read the cart back. The merge-add is a
//! single `INSERT .. ON CONFLICT DO UPDATE`, so concurrent adds of the same
//! product never lose an increment.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::domain::cart::{Cart, CartLine};
use crate::domain::foundation::{
    DomainError, ErrorCode, ProductId, Quantity, Timestamp, UserId, MAX_QUANTITY,
};
use crate::ports::CartRepository;

use super::{corrupt_row, db_error};

/// PostgreSQL implementation of CartRepository.
#[derive(Clone)]
pub struct PostgresCartRepository {
    pool: PgPool,
}

impl PostgresCartRepository {
    /// Creates a new PostgresCartRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepository {
    async fn find_or_create(&self, owner: &UserId) -> Result<Cart, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| db_error("Failed to acquire connection", e))?;
        ensure_cart(&mut conn, owner).await?;
        load_cart(&mut conn, owner).await
    }

    async fn add_line(
        &self,
        owner: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<Cart, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        ensure_cart(&mut tx, owner).await?;

        // No row comes back when the guarded update would exceed the maximum.
        let merged = sqlx::query(
            r#"
            INSERT INTO cart_lines (owner, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (owner, product_id) DO UPDATE
                SET quantity = cart_lines.quantity + EXCLUDED.quantity
                WHERE cart_lines.quantity::BIGINT + EXCLUDED.quantity <= $4
            RETURNING quantity
            "#,
        )
        .bind(owner.as_str())
        .bind(product_id.as_uuid())
        .bind(quantity_param(quantity))
        .bind(i64::from(MAX_QUANTITY))
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to add cart line", e))?;

        if merged.is_none() {
            return Err(DomainError::invalid_argument(
                "quantity",
                format!("quantity must not exceed {}", MAX_QUANTITY),
            ));
        }

        touch_cart(&mut tx, owner).await?;
        let cart = load_cart(&mut tx, owner).await?;
        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit cart", e))?;
        Ok(cart)
    }

    async fn set_line_quantity(
        &self,
        owner: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<Cart, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        ensure_cart(&mut tx, owner).await?;

        let result = sqlx::query(
            "UPDATE cart_lines SET quantity = $3 WHERE owner = $1 AND product_id = $2",
        )
        .bind(owner.as_str())
        .bind(product_id.as_uuid())
        .bind(quantity_param(quantity))
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update cart line", e))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::CartLineNotFound, "Item not found in cart")
                    .with_detail("product_id", product_id.to_string()),
            );
        }

        touch_cart(&mut tx, owner).await?;
        let cart = load_cart(&mut tx, owner).await?;
        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit cart", e))?;
        Ok(cart)
    }

    async fn remove_lines(
        &self,
        owner: &UserId,
        product_ids: &[ProductId],
    ) -> Result<Cart, DomainError> {
        let ids: Vec<Uuid> = product_ids.iter().map(|id| *id.as_uuid()).collect();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        ensure_cart(&mut tx, owner).await?;

        let result = sqlx::query("DELETE FROM cart_lines WHERE owner = $1 AND product_id = ANY($2)")
            .bind(owner.as_str())
            .bind(&ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to remove cart lines", e))?;

        if result.rows_affected() > 0 {
            touch_cart(&mut tx, owner).await?;
        }
        let cart = load_cart(&mut tx, owner).await?;
        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit cart", e))?;
        Ok(cart)
    }

    async fn clear(&self, owner: &UserId) -> Result<Cart, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;
        ensure_cart(&mut tx, owner).await?;

        sqlx::query("DELETE FROM cart_lines WHERE owner = $1")
            .bind(owner.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to clear cart", e))?;

        touch_cart(&mut tx, owner).await?;
        let cart = load_cart(&mut tx, owner).await?;
        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit cart", e))?;
        Ok(cart)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn quantity_param(quantity: Quantity) -> i32 {
    // MAX_QUANTITY fits an INTEGER column.
    i32::try_from(quantity.get()).unwrap_or(i32::MAX)
}

async fn ensure_cart(conn: &mut PgConnection, owner: &UserId) -> Result<(), DomainError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO carts (owner, created_at, updated_at)
        VALUES ($1, $2, $2)
        ON CONFLICT (owner) DO NOTHING
        "#,
    )
    .bind(owner.as_str())
    .bind(now)
    .execute(conn)
    .await
    .map_err(|e| db_error("Failed to create cart", e))?;
    Ok(())
}

/// Moves `updated_at` strictly forward, mirroring `Timestamp::advance_from`.
async fn touch_cart(conn: &mut PgConnection, owner: &UserId) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        UPDATE carts
        SET updated_at = GREATEST($2, updated_at + INTERVAL '1 microsecond')
        WHERE owner = $1
        "#,
    )
    .bind(owner.as_str())
    .bind(Utc::now())
    .execute(conn)
    .await
    .map_err(|e| db_error("Failed to touch cart", e))?;
    Ok(())
}

async fn load_cart(conn: &mut PgConnection, owner: &UserId) -> Result<Cart, DomainError> {
    let header = sqlx::query("SELECT created_at, updated_at FROM carts WHERE owner = $1")
        .bind(owner.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| db_error("Failed to fetch cart", e))?;

    let created_at: DateTime<Utc> = header
        .try_get("created_at")
        .map_err(|e| corrupt_row("Failed to get created_at", e))?;
    let updated_at: DateTime<Utc> = header
        .try_get("updated_at")
        .map_err(|e| corrupt_row("Failed to get updated_at", e))?;

    let rows = sqlx::query(
        "SELECT product_id, quantity FROM cart_lines WHERE owner = $1 ORDER BY position",
    )
    .bind(owner.as_str())
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| db_error("Failed to fetch cart lines", e))?;

    let lines = rows
        .into_iter()
        .map(row_to_line)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Cart::reconstitute(
        owner.clone(),
        lines,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_line(row: sqlx::postgres::PgRow) -> Result<CartLine, DomainError> {
    let product_id: Uuid = row
        .try_get("product_id")
        .map_err(|e| corrupt_row("Failed to get product_id", e))?;
    let quantity: i32 = row
        .try_get("quantity")
        .map_err(|e| corrupt_row("Failed to get quantity", e))?;
    let quantity =
        Quantity::new(i64::from(quantity)).map_err(|e| corrupt_row("Invalid stored quantity", e))?;
    Ok(CartLine::new(ProductId::from_uuid(product_id), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_param_fits_integer_column() {
        assert_eq!(quantity_param(Quantity::ONE), 1);
        let max = Quantity::new(i64::from(MAX_QUANTITY)).unwrap();
        assert_eq!(quantity_param(max), i32::MAX);
    }
}
