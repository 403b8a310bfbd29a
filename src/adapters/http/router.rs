//! Full storefront router: every API module behind the auth middleware,
//! plus tracing, CORS and request timeouts.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domain::cart::DanglingLinePolicy;
use crate::domain::order::StatusTransitionPolicy;
use crate::ports::{
    CartRepository, OrderRepository, ProductRepository, SessionValidator, UserRepository,
};

use super::cart::{cart_router, CartAppState};
use super::catalog::{catalog_router, CatalogAppState};
use super::middleware::auth_middleware;
use super::order::{order_router, OrderAppState};
use super::user::{user_router, UserAppState};

/// Ports the server is wired with.
#[derive(Clone)]
pub struct StorefrontServices {
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionValidator>,
}

/// Transport-level settings.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    pub status_policy: StatusTransitionPolicy,
    pub dangling_line_policy: DanglingLinePolicy,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout: Option<Duration>,
}

/// Builds the application router.
///
/// # Routes
///
/// - `/api/cart/**` - Cart (authenticated)
/// - `/api/orders/**` - Orders (authenticated)
/// - `/api/admin/orders/**` - Order administration (admin)
/// - `/api/products/**` - Catalog (public)
/// - `/api/admin/products/**` - Catalog administration (admin)
/// - `/api/users/me` - The caller's profile (authenticated)
/// - `/api/admin/users/**` - User directory (admin)
/// - `/health` - Liveness
pub fn storefront_router(services: StorefrontServices, options: RouterOptions) -> Router {
    let cart_state = CartAppState::new(
        services.carts.clone(),
        services.products.clone(),
        options.dangling_line_policy,
    );
    let order_state = OrderAppState::new(
        services.orders.clone(),
        services.carts.clone(),
        options.status_policy,
    );
    let catalog_state = CatalogAppState::new(services.products.clone());
    let user_state = UserAppState::new(services.users.clone());

    let api = Router::new()
        .merge(cart_router().with_state(cart_state))
        .merge(order_router().with_state(order_state))
        .merge(catalog_router().with_state(catalog_state))
        .merge(user_router().with_state(user_state));

    let mut app = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            services.sessions.clone(),
            auth_middleware,
        ));

    if let Some(timeout) = options.request_timeout {
        app = app.layer(TimeoutLayer::new(timeout));
    }

    app.layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(AllowOrigin::list(parsed))
    }
}

/// GET /health - Liveness
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
