//! PostgreSQL implementation of OrderRepository.
//!
//! Lines and the shipping address are stored as JSONB snapshots; only
//! `status` and `updated_at` are ever rewritten.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Money, OrderId, Timestamp, UserId};
use crate::domain::order::{Order, OrderLine, OrderStatus, PaymentMethod, ShippingAddress};
use crate::ports::{stale_status, OrderRepository};

use super::{corrupt_row, db_error};

/// Writes only when the stored status is still the one the change was based on.
const UPDATE_STATUS: &str =
    "UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1 AND status = $4";

const SELECT_ORDER: &str = r#"
    SELECT id, owner, lines, total_amount, shipping_address, payment_method,
           status, placed_at, updated_at
    FROM orders
"#;

/// PostgreSQL implementation of OrderRepository.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new PostgresOrderRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, owner, lines, total_amount, shipping_address, payment_method,
                status, placed_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(order.owner().as_str())
        .bind(Json(order.lines()))
        .bind(order.total_amount().amount())
        .bind(Json(order.shipping_address()))
        .bind(order.payment_method().as_str())
        .bind(order.status().as_str())
        .bind(order.placed_at().as_datetime())
        .bind(order.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert order", e))?;

        Ok(())
    }

    async fn update(&self, order: &Order, expected: OrderStatus) -> Result<(), DomainError> {
        let result = sqlx::query(UPDATE_STATUS)
            .bind(order.id().as_uuid())
            .bind(order.status().as_str())
            .bind(order.updated_at().as_datetime())
            .bind(expected.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update order", e))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM orders WHERE id = $1)")
            .bind(order.id().as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check order", e))?;

        if exists {
            Err(stale_status(order))
        } else {
            Err(DomainError::new(
                ErrorCode::OrderNotFound,
                format!("Order not found: {}", order.id()),
            ))
        }
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_ORDER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch order", e))?;

        row.map(row_to_order).transpose()
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Order>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE owner = $1 ORDER BY placed_at DESC",
            SELECT_ORDER
        ))
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch orders by owner", e))?;

        rows.into_iter().map(row_to_order).collect()
    }

    async fn list_all(&self) -> Result<Vec<Order>, DomainError> {
        let rows = sqlx::query(&format!("{} ORDER BY placed_at DESC", SELECT_ORDER))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list orders", e))?;

        rows.into_iter().map(row_to_order).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_order(row: sqlx::postgres::PgRow) -> Result<Order, DomainError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| corrupt_row("Failed to get id", e))?;
    let owner: String = row
        .try_get("owner")
        .map_err(|e| corrupt_row("Failed to get owner", e))?;
    let Json(lines): Json<Vec<OrderLine>> = row
        .try_get("lines")
        .map_err(|e| corrupt_row("Failed to get lines", e))?;
    let total_amount: Decimal = row
        .try_get("total_amount")
        .map_err(|e| corrupt_row("Failed to get total_amount", e))?;
    let Json(shipping_address): Json<ShippingAddress> = row
        .try_get("shipping_address")
        .map_err(|e| corrupt_row("Failed to get shipping_address", e))?;
    let payment_method: String = row
        .try_get("payment_method")
        .map_err(|e| corrupt_row("Failed to get payment_method", e))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| corrupt_row("Failed to get status", e))?;
    let placed_at: DateTime<Utc> = row
        .try_get("placed_at")
        .map_err(|e| corrupt_row("Failed to get placed_at", e))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| corrupt_row("Failed to get updated_at", e))?;

    Ok(Order::reconstitute(
        OrderId::from_uuid(id),
        UserId::new(owner).map_err(|e| corrupt_row("Invalid owner", e))?,
        lines,
        Money::new(total_amount).map_err(|e| corrupt_row("Invalid total_amount", e))?,
        shipping_address,
        payment_method
            .parse::<PaymentMethod>()
            .map_err(|e| corrupt_row("Invalid payment_method", e))?,
        status
            .parse::<OrderStatus>()
            .map_err(|e| corrupt_row("Invalid status", e))?,
        Timestamp::from_datetime(placed_at),
        Timestamp::from_datetime(updated_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_status_strings_parse_back() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!(
            PaymentMethod::CashOnDelivery.as_str().parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CashOnDelivery
        );
    }

    #[test]
    fn status_update_is_guarded_by_previous_status() {
        assert!(UPDATE_STATUS.contains("WHERE id = $1 AND status = $4"));
    }

    #[test]
    fn select_lists_every_reconstituted_column() {
        for column in [
            "id",
            "owner",
            "lines",
            "total_amount",
            "shipping_address",
            "payment_method",
            "status",
            "placed_at",
            "updated_at",
        ] {
            assert!(SELECT_ORDER.contains(column), "missing {}", column);
        }
    }
}
