//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCartRepository` - carts and their lines, merge-add in one statement
//! - `PostgresOrderRepository` - orders with JSONB line and address snapshots
//! - `PostgresProductRepository` - catalog with JSONB kits
//! - `PostgresUserRepository` - user directory profiles

mod cart_repository;
mod order_repository;
mod product_repository;
mod user_repository;

pub use cart_repository::PostgresCartRepository;
pub use order_repository::PostgresOrderRepository;
pub use product_repository::PostgresProductRepository;
pub use user_repository::PostgresUserRepository;

use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Creates a connection pool from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(config.url.expose_secret())
        .await
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Maps a driver failure to `Unavailable`, logging the cause.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::unavailable(format!("{}: {}", context, err))
}

/// Maps a malformed stored row to an internal error.
pub(crate) fn corrupt_row(context: &str, detail: impl std::fmt::Display) -> DomainError {
    tracing::error!(%detail, "{}", context);
    DomainError::new(
        crate::domain::foundation::ErrorCode::InternalError,
        format!("{}: {}", context, detail),
    )
}
