//! Axum router configuration for user directory endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{
    change_user_role, delete_user, get_my_profile, get_user, list_users, save_my_profile,
    UserAppState,
};

/// The caller's own profile.
pub fn profile_routes() -> Router<UserAppState> {
    Router::new().route("/me", get(get_my_profile).put(save_my_profile))
}

/// Admin directory routes.
pub fn admin_user_routes() -> Router<UserAppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user).delete(delete_user))
        .route("/:id/role", patch(change_user_role))
}

/// User router for mounting at `/api`.
pub fn user_router() -> Router<UserAppState> {
    Router::new()
        .nest("/users", profile_routes())
        .nest("/admin/users", admin_user_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::http::middleware::{auth_middleware, AuthState};
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::user::{ProfileDetails, UserProfile};

    fn profile(id: &str, role: Role, email: &str, city: &str) -> UserProfile {
        UserProfile::register(
            UserId::new(id).unwrap(),
            role,
            ProfileDetails::new(id).with_email(email).with_city(city),
        )
        .unwrap()
    }

    fn test_app() -> Router {
        let repo = InMemoryUserRepository::with_users([
            profile("admin-1", Role::Admin, "root@crafthaven.shop", "Leeds"),
            profile("user-b", Role::Customer, "bea@example.com", "York"),
        ]);
        let validator: AuthState = Arc::new(
            MockSessionValidator::new()
                .with_test_user("token-a", "user-a")
                .with_test_user("token-b", "user-b")
                .with_test_admin("token-admin", "admin-1"),
        );
        Router::new()
            .nest("/api", user_router())
            .with_state(UserAppState::new(Arc::new(repo)))
            .layer(middleware::from_fn_with_state(validator, auth_middleware))
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn profile_requires_a_session() {
        let app = test_app();
        let (status, _) = send(&app, request("GET", "/api/users/me", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn profile_is_created_by_first_put() {
        let app = test_app();

        let (status, body) = send(&app, request("GET", "/api/users/me", Some("token-a"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");

        let (status, saved) = send(
            &app,
            request(
                "PUT",
                "/api/users/me",
                Some("token-a"),
                Some(json!({"name": "Ada", "email": "ada@example.com"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved["id"], "user-a");
        assert_eq!(saved["city"], "unknown");
        assert_eq!(saved["role"], "customer");

        let (status, fetched) = send(&app, request("GET", "/api/users/me", Some("token-a"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn invalid_profile_is_400() {
        let app = test_app();
        let (status, body) = send(
            &app,
            request("PUT", "/api/users/me", Some("token-a"), Some(json!({"name": "  "}))),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn customers_cannot_browse_the_directory() {
        let app = test_app();
        let (status, _) = send(&app, request("GET", "/api/admin/users", Some("token-b"), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_lists_and_filters_by_email() {
        let app = test_app();

        let (status, all) = send(&app, request("GET", "/api/admin/users", Some("token-admin"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (_, found) = send(
            &app,
            request(
                "GET",
                "/api/admin/users?email=BEA@example.com",
                Some("token-admin"),
                None,
            ),
        )
        .await;
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["id"], "user-b");
    }

    #[tokio::test]
    async fn admin_promotes_then_deletes_user() {
        let app = test_app();

        let (status, promoted) = send(
            &app,
            request(
                "PATCH",
                "/api/admin/users/user-b/role",
                Some("token-admin"),
                Some(json!({"role": "admin"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(promoted["role"], "admin");

        let (status, _) = send(
            &app,
            request("DELETE", "/api/admin/users/user-b", Some("token-admin"), None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(
            &app,
            request("GET", "/api/admin/users/user-b", Some("token-admin"), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn admin_cannot_remove_themselves() {
        let app = test_app();

        let (status, body) = send(
            &app,
            request("DELETE", "/api/admin/users/admin-1", Some("token-admin"), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ARGUMENT");

        let (status, _) = send(
            &app,
            request(
                "PATCH",
                "/api/admin/users/admin-1/role",
                Some("token-admin"),
                Some(json!({"role": "customer"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_role_gets_error_envelope() {
        let app = test_app();

        let (status, body) = send(
            &app,
            request(
                "PATCH",
                "/api/admin/users/user-b/role",
                Some("token-admin"),
                Some(json!({"role": "owner"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ARGUMENT");
    }
}
