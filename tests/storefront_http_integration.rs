//! End-to-end tests through the full storefront router.
//!
//! Uses in-memory repositories and real HS256 tokens, so the auth middleware,
//! every API module and the cross-module effects (checkout clears the cart,
//! deleted products drop out of carts) are exercised together.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use craft_haven::adapters::auth::JwtSessionValidator;
use craft_haven::adapters::http::{storefront_router, RouterOptions, StorefrontServices};
use craft_haven::adapters::memory::{
    InMemoryCartRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryUserRepository,
};
use craft_haven::domain::order::StatusTransitionPolicy;

// =============================================================================
// Test Infrastructure
// =============================================================================

const SECRET: &str = "integration-test-secret-that-is-long-enough";

fn token(id: &str, role: &str, expires_in_secs: i64) -> String {
    token_signed_with(SECRET, id, role, expires_in_secs)
}

fn token_signed_with(secret: &str, id: &str, role: &str, expires_in_secs: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + expires_in_secs;
    encode(
        &Header::default(),
        &json!({ "id": id, "role": role, "exp": exp }),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn app(status_policy: StatusTransitionPolicy) -> Router {
    let services = StorefrontServices {
        carts: Arc::new(InMemoryCartRepository::new()),
        orders: Arc::new(InMemoryOrderRepository::new()),
        products: Arc::new(InMemoryProductRepository::new()),
        users: Arc::new(InMemoryUserRepository::new()),
        sessions: Arc::new(JwtSessionValidator::new(
            &SecretString::new(SECRET.to_string()),
            0,
        )),
    };
    storefront_router(
        services,
        RouterOptions {
            status_policy,
            ..Default::default()
        },
    )
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create_product(app: &Router, admin: &str, body: Value) -> String {
    let (status, product) = call(app, "POST", "/api/admin/products", Some(admin), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", product);
    product["id"].as_str().unwrap().to_string()
}

fn address() -> Value {
    json!({
        "fullName": "Asha Rao",
        "addressLine1": "12 Loom Street",
        "city": "Pune",
        "state": "MH",
        "pincode": "411001",
        "phone": "9876543210"
    })
}

// =============================================================================
// Shopping flow
// =============================================================================

#[tokio::test]
async fn browse_add_checkout_and_fulfil() {
    let app = app(StatusTransitionPolicy::Permissive);
    let admin = token("admin-1", "admin", 3600);
    let customer = token("user-1", "user", 3600);

    let loom = create_product(
        &app,
        &admin,
        json!({"name": "Loom", "detail": "Frame loom", "category": "Weaving", "price": "12.5", "featured": true}),
    )
    .await;
    let robot = create_product(
        &app,
        &admin,
        json!({
            "name": "Robot",
            "detail": "Line follower",
            "category": "Robotics",
            "kits": [
                {"kitName": "Chassis", "kitDescription": "Frame and wheels", "kitPrice": "3"},
                {"kitName": "Brain", "kitDescription": "Controller board", "kitPrice": "4"}
            ]
        }),
    )
    .await;

    let (status, featured) = call(&app, "GET", "/api/products?featured=true", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(featured.as_array().unwrap().len(), 1);

    // Adding the same product twice merges into one line.
    call(&app, "POST", "/api/cart/lines", Some(&customer), Some(json!({"productId": loom}))).await;
    let (status, cart) = call(
        &app,
        "POST",
        "/api/cart/lines",
        Some(&customer),
        Some(json!({"productId": loom, "quantity": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["quantity"], 3);

    let (_, cart) = call(
        &app,
        "POST",
        "/api/cart/lines",
        Some(&customer),
        Some(json!({"productId": robot, "quantity": 1})),
    )
    .await;
    assert_eq!(cart["lines"][1]["unitPrice"], "7");
    assert_eq!(cart["total"], "44.5");

    let (status, order) = call(
        &app,
        "POST",
        "/api/orders",
        Some(&customer),
        Some(json!({
            "items": [
                {"productId": loom, "quantity": 3, "price": "12.5"},
                {"productId": robot, "quantity": 1, "price": "7"}
            ],
            "totalAmount": "44.5",
            "shippingAddress": address()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", order);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["paymentMethod"], "COD");
    let order_id = order["id"].as_str().unwrap().to_string();

    let (_, cart) = call(&app, "GET", "/api/cart", Some(&customer), None).await;
    assert!(cart["lines"].as_array().unwrap().is_empty());

    let (_, mine) = call(&app, "GET", "/api/orders", Some(&customer), None).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let (status, updated) = call(
        &app,
        "PATCH",
        &format!("/api/admin/orders/{}/status", order_id),
        Some(&admin),
        Some(json!({"status": "shipped"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "shipped");

    let (_, fetched) = call(&app, "GET", &format!("/api/orders/{}", order_id), Some(&customer), None).await;
    assert_eq!(fetched["status"], "shipped");
    assert_eq!(fetched["totalAmount"], "44.5");
}

#[tokio::test]
async fn deleted_product_drops_out_of_cart() {
    let app = app(StatusTransitionPolicy::Permissive);
    let admin = token("admin-1", "admin", 3600);
    let customer = token("user-1", "user", 3600);

    let kept = create_product(&app, &admin, json!({"name": "Yarn", "detail": "Wool", "category": "Knit", "price": "2"})).await;
    let gone = create_product(&app, &admin, json!({"name": "Hook", "detail": "Steel", "category": "Knit", "price": "1"})).await;

    for id in [&kept, &gone] {
        call(&app, "POST", "/api/cart/lines", Some(&customer), Some(json!({"productId": id}))).await;
    }

    let (status, _) = call(&app, "DELETE", &format!("/api/admin/products/{}", gone), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, cart) = call(&app, "GET", "/api/cart", Some(&customer), None).await;
    let lines = cart["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["productId"], kept.as_str());
    assert_eq!(cart["total"], "2");
}

#[tokio::test]
async fn placed_orders_keep_their_prices_after_catalog_edits() {
    let app = app(StatusTransitionPolicy::Permissive);
    let admin = token("admin-1", "admin", 3600);
    let customer = token("user-1", "user", 3600);

    let lamp = create_product(
        &app,
        &admin,
        json!({
            "name": "Lamp",
            "detail": "Paper lamp",
            "category": "Lighting",
            "kits": [{"kitName": "Shade", "kitDescription": "Paper", "kitPrice": "6"}]
        }),
    )
    .await;

    let (status, order) = call(
        &app,
        "POST",
        "/api/orders",
        Some(&customer),
        Some(json!({
            "items": [{"productId": lamp, "quantity": 2, "price": "6"}],
            "totalAmount": "12",
            "shippingAddress": address()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", order);
    let order_uri = format!("/api/orders/{}", order["id"].as_str().unwrap());

    let (status, edited) = call(
        &app,
        "PUT",
        &format!("/api/admin/products/{}", lamp),
        Some(&admin),
        Some(json!({
            "name": "Lamp",
            "detail": "Paper lamp",
            "category": "Lighting",
            "price": "20",
            "kits": [{"kitName": "Shade", "kitDescription": "Silk", "kitPrice": "9"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", edited);

    let (status, fetched) = call(&app, "GET", &order_uri, Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["lines"][0]["unitPrice"], "6");
    assert_eq!(fetched["lines"][0]["quantity"], 2);
    assert_eq!(fetched["totalAmount"], "12");

    let (_, mine) = call(&app, "GET", "/api/orders", Some(&customer), None).await;
    assert_eq!(mine[0]["totalAmount"], "12");
}

#[tokio::test]
async fn malformed_bodies_get_error_envelope() {
    let app = app(StatusTransitionPolicy::Permissive);
    let customer = token("user-1", "user", 3600);

    let (status, body) = call(&app, "POST", "/api/cart/lines", Some(&customer), Some(json!({"quantity": 2}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let request = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", customer))
        .body(Body::from("{\"items\": ["))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn carts_are_isolated_per_user() {
    let app = app(StatusTransitionPolicy::Permissive);
    let admin = token("admin-1", "admin", 3600);
    let alice = token("alice", "user", 3600);
    let bob = token("bob", "user", 3600);

    let id = create_product(&app, &admin, json!({"name": "Clay", "detail": "Air dry", "category": "Pottery", "price": "5"})).await;
    call(&app, "POST", "/api/cart/lines", Some(&alice), Some(json!({"productId": id}))).await;

    let (_, bobs) = call(&app, "GET", "/api/cart", Some(&bob), None).await;
    assert!(bobs["lines"].as_array().unwrap().is_empty());

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/cart/lines/{}", id),
        Some(&bob),
        Some(json!({"quantity": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CART_LINE_NOT_FOUND");
}

#[tokio::test]
async fn strict_policy_enforces_lifecycle() {
    let app = app(StatusTransitionPolicy::Strict);
    let admin = token("admin-1", "admin", 3600);
    let customer = token("user-1", "user", 3600);

    let id = create_product(&app, &admin, json!({"name": "Kit", "detail": "Parts", "category": "Misc", "price": "3"})).await;
    let (_, order) = call(
        &app,
        "POST",
        "/api/orders",
        Some(&customer),
        Some(json!({
            "items": [{"productId": id, "quantity": 1, "price": "3"}],
            "shippingAddress": address()
        })),
    )
    .await;
    let uri = format!("/api/admin/orders/{}/status", order["id"].as_str().unwrap());

    let (status, body) = call(&app, "PATCH", &uri, Some(&admin), Some(json!({"status": "delivered"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let (status, _) = call(&app, "PATCH", &uri, Some(&admin), Some(json!({"status": "confirmed"}))).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn expired_and_forged_tokens_are_rejected() {
    let app = app(StatusTransitionPolicy::Permissive);

    let expired = token("user-1", "user", -600);
    let (status, body) = call(&app, "GET", "/api/cart", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let forged = token_signed_with("some-other-secret", "user-1", "admin", 3600);
    let (status, _) = call(&app, "GET", "/api/admin/orders", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&app, "GET", "/api/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_routes_need_no_token() {
    let app = app(StatusTransitionPolicy::Permissive);

    let (status, _) = call(&app, "GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn customers_cannot_reach_admin_routes() {
    let app = app(StatusTransitionPolicy::Permissive);
    let customer = token("user-1", "user", 3600);

    let (status, body) = call(&app, "GET", "/api/admin/orders", Some(&customer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn profiles_feed_the_admin_directory() {
    let app = app(StatusTransitionPolicy::Permissive);
    let admin = token("admin-1", "admin", 3600);
    let shopper = token("user-1", "user", 3600);

    let (status, me) = call(
        &app,
        "PUT",
        "/api/users/me",
        Some(&shopper),
        Some(json!({ "name": "Asha Rao", "email": "asha@example.com", "city": "Pune" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", me);
    assert_eq!(me["role"], "customer");

    let (status, _) = call(&app, "GET", "/api/admin/users", Some(&shopper), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, found) = call(&app, "GET", "/api/admin/users?city=pune", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["email"], "asha@example.com");

    let (status, promoted) = call(
        &app,
        "PATCH",
        "/api/admin/users/user-1/role",
        Some(&admin),
        Some(json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(promoted["role"], "admin");

    // The profile keeps the granted role when its owner edits it.
    let (_, me) = call(
        &app,
        "PUT",
        "/api/users/me",
        Some(&shopper),
        Some(json!({ "name": "Asha R." })),
    )
    .await;
    assert_eq!(me["role"], "admin");
    assert_eq!(me["city"], "unknown");

    let (status, _) = call(&app, "DELETE", "/api/admin/users/user-1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, "GET", "/api/users/me", Some(&shopper), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
