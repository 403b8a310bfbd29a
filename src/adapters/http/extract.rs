//! JSON body extractor that answers with the storefront error body.

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::Response,
    Json,
};
use serde::de::DeserializeOwned;

use super::error::error_response;
use crate::domain::foundation::ErrorCode;

/// Drop-in for `axum::Json` on request bodies. Malformed JSON, a wrong
/// content type or a missing field becomes `400 INVALID_ARGUMENT` with the
/// usual `{ code, message }` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: JsonRejection) -> Response {
    tracing::debug!(status = %rejection.status(), "rejected request body");
    error_response(ErrorCode::InvalidArgument, rejection.body_text())
}
