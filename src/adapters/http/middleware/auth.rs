//! Bearer authentication for the storefront routes.
//!
//! `auth_middleware` runs on every request. A request without an
//! `Authorization` header passes through untouched so catalog browsing stays
//! public; a header carrying a bad or expired token is answered with 401
//! right away. Handlers then ask for the caller with `RequireAuth` or
//! `RequireAdmin`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::error_response;
use crate::domain::foundation::{AuthError, AuthenticatedUser, ErrorCode};
use crate::ports::SessionValidator;

pub type AuthState = Arc<dyn SessionValidator>;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::trim)
}

pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AuthError::ServiceUnavailable(reason)) => {
            tracing::error!(error = %reason, "token validation unavailable");
            error_response(ErrorCode::Unavailable, "Authentication service unavailable")
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %request.uri().path(), "rejected bearer token");
            let message = if e == AuthError::TokenExpired {
                "Token expired"
            } else {
                "Invalid or expired token"
            };
            error_response(ErrorCode::Unauthorized, message)
        }
    }
}

fn caller(parts: &Parts) -> Result<AuthenticatedUser, AuthRejection> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or(AuthRejection::Unauthenticated)
}

/// Any signed-in caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller(parts).map(RequireAuth)
    }
}

/// A signed-in caller with the admin role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = caller(parts)?;
        if user.is_admin() {
            Ok(RequireAdmin(user))
        } else {
            Err(AuthRejection::Forbidden)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// 401
    Unauthenticated,
    /// 403
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => {
                error_response(ErrorCode::Unauthorized, "Authentication required")
            }
            AuthRejection::Forbidden => error_response(ErrorCode::Forbidden, "Admin access required"),
        }
    }
}
