//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, Role, Timestamp, UserId};
use crate::domain::user::UserProfile;
use crate::ports::{user_not_found, UserFilter, UserRepository};

use super::{corrupt_row, db_error};

const SELECT_USER: &str = r#"
    SELECT id, name, email, city, role, created_at, updated_at
    FROM users
"#;

/// `created_at` is kept from the first insert.
const UPSERT_USER: &str = r#"
    INSERT INTO users (id, name, email, city, role, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    ON CONFLICT (id) DO UPDATE SET
        name = EXCLUDED.name,
        email = EXCLUDED.email,
        city = EXCLUDED.city,
        role = EXCLUDED.role,
        updated_at = EXCLUDED.updated_at
"#;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch user", e))?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<UserProfile>, DomainError> {
        // NULL parameters disable their predicate.
        let rows = sqlx::query(&format!(
            r#"{}
            WHERE ($1::TEXT IS NULL OR lower(email) = lower($1))
              AND ($2::TEXT IS NULL OR lower(city) = lower($2))
            ORDER BY created_at, id"#,
            SELECT_USER
        ))
        .bind(filter.email.as_deref())
        .bind(filter.city.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list users", e))?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn save(&self, user: &UserProfile) -> Result<(), DomainError> {
        sqlx::query(UPSERT_USER)
            .bind(user.id().as_str())
            .bind(user.name())
            .bind(user.email())
            .bind(user.city())
            .bind(user.role().to_string())
            .bind(user.created_at().as_datetime())
            .bind(user.updated_at().as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to save user", e))?;

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}

fn parse_role(raw: &str) -> Result<Role, DomainError> {
    match raw {
        "customer" => Ok(Role::Customer),
        "admin" => Ok(Role::Admin),
        other => Err(corrupt_row("Unknown stored role", other)),
    }
}

fn row_to_user(row: sqlx::postgres::PgRow) -> Result<UserProfile, DomainError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| corrupt_row("Failed to get id", e))?;
    let role: String = row
        .try_get("role")
        .map_err(|e| corrupt_row("Failed to get role", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| corrupt_row("Failed to get created_at", e))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| corrupt_row("Failed to get updated_at", e))?;

    Ok(UserProfile::reconstitute(
        UserId::new(id).map_err(|e| corrupt_row("Invalid stored user id", e))?,
        row.try_get("name")
            .map_err(|e| corrupt_row("Failed to get name", e))?,
        row.try_get("email")
            .map_err(|e| corrupt_row("Failed to get email", e))?,
        row.try_get("city")
            .map_err(|e| corrupt_row("Failed to get city", e))?,
        parse_role(&role)?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
