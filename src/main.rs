//! Craft Haven API server.
//!
//! Serves the storefront REST API. Carts, orders, the catalog and the user
//! directory live in PostgreSQL when `CRAFT_HAVEN__DATABASE__URL` is set,
//! otherwise in memory.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use craft_haven::adapters::auth::JwtSessionValidator;
use craft_haven::adapters::http::{storefront_router, RouterOptions, StorefrontServices};
use craft_haven::adapters::memory::{
    InMemoryCartRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryUserRepository,
};
use craft_haven::adapters::postgres::{
    self, PostgresCartRepository, PostgresOrderRepository, PostgresProductRepository,
    PostgresUserRepository,
};
use craft_haven::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let sessions = Arc::new(JwtSessionValidator::new(
        &config.auth.jwt_secret,
        config.auth.leeway_secs,
    ));

    let services = match &config.database {
        Some(database) => {
            let pool = postgres::connect(database).await?;
            tracing::info!(url = %database.redacted_url(), "Database pool created");

            if database.run_migrations {
                postgres::run_migrations(&pool).await?;
                tracing::info!("Migrations applied");
            }

            StorefrontServices {
                carts: Arc::new(PostgresCartRepository::new(pool.clone())),
                orders: Arc::new(PostgresOrderRepository::new(pool.clone())),
                products: Arc::new(PostgresProductRepository::new(pool.clone())),
                users: Arc::new(PostgresUserRepository::new(pool)),
                sessions,
            }
        }
        None => {
            tracing::warn!("No database configured, using in-memory stores");
            StorefrontServices {
                carts: Arc::new(InMemoryCartRepository::new()),
                orders: Arc::new(InMemoryOrderRepository::new()),
                products: Arc::new(InMemoryProductRepository::new()),
                users: Arc::new(InMemoryUserRepository::new()),
                sessions,
            }
        }
    };

    let options = RouterOptions {
        status_policy: config.features.status_transition_policy,
        dangling_line_policy: config.features.dangling_line_policy,
        cors_origins: config.server.cors_origins_list(),
        request_timeout: Some(config.server.request_timeout()),
    };
    let app = storefront_router(services, options);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(environment = ?config.server.environment, "craft-haven listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
