//! HTTP Cart Gateway - `CartGateway` over the storefront REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let gateway = HttpCartGateway::new(
//!     HttpGatewayConfig::new("http://localhost:8080").with_timeout(Duration::from_secs(5)),
//! )?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::adapters::http::ErrorResponse;
use crate::domain::cart::CartView;
use crate::domain::foundation::{DomainError, ErrorCode, ProductId, Quantity};
use crate::domain::order::Order;
use crate::ports::{CartGateway, OrderSubmission};

/// Configuration for the HTTP cart gateway.
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Storefront origin, without the `/api` suffix.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpGatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Storefront API client used by the cart mirror.
#[derive(Debug, Clone)]
pub struct HttpCartGateway {
    config: HttpGatewayConfig,
    client: Client,
}

impl HttpCartGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn line_url(&self, product_id: &ProductId) -> String {
        self.url(&format!("/cart/lines/{}", product_id))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &SecretString,
    ) -> Result<T, DomainError> {
        let response = request
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::unavailable(format!(
                        "Request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    DomainError::unavailable(format!("Connection failed: {}", e))
                } else {
                    DomainError::unavailable(e.to_string())
                }
            })?;

        let response = handle_response_status(response).await?;

        response.json::<T>().await.map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to parse response: {}", e),
            )
        })
    }
}

#[async_trait]
impl CartGateway for HttpCartGateway {
    async fn fetch_cart(&self, token: &SecretString) -> Result<CartView, DomainError> {
        self.send(self.client.get(self.url("/cart")), token).await
    }

    async fn add_line(
        &self,
        token: &SecretString,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<CartView, DomainError> {
        let body = json!({ "productId": product_id, "quantity": quantity });
        self.send(self.client.post(self.url("/cart/lines")).json(&body), token)
            .await
    }

    async fn set_line_quantity(
        &self,
        token: &SecretString,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<CartView, DomainError> {
        let body = json!({ "quantity": quantity });
        self.send(self.client.put(self.line_url(product_id)).json(&body), token)
            .await
    }

    async fn remove_line(
        &self,
        token: &SecretString,
        product_id: &ProductId,
    ) -> Result<CartView, DomainError> {
        self.send(self.client.delete(self.line_url(product_id)), token)
            .await
    }

    async fn clear(&self, token: &SecretString) -> Result<CartView, DomainError> {
        self.send(self.client.delete(self.url("/cart")), token).await
    }

    async fn place_order(
        &self,
        token: &SecretString,
        submission: &OrderSubmission,
    ) -> Result<Order, DomainError> {
        self.send(self.client.post(self.url("/orders")).json(submission), token)
            .await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Turns a non-success response into the error the backend reported.
async fn handle_response_status(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(error_from_body(status, &body))
}

fn error_from_body(status: StatusCode, body: &str) -> DomainError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error) => {
            let code = ErrorCode::from_wire(&error.code).unwrap_or_else(|| code_from_status(status));
            DomainError::new(code, error.message)
        }
        Err(_) => DomainError::new(
            code_from_status(status),
            format!("Unexpected status {}: {}", status, body),
        ),
    }
}

fn code_from_status(status: StatusCode) -> ErrorCode {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::InvalidArgument,
        StatusCode::UNAUTHORIZED => ErrorCode::Unauthorized,
        StatusCode::FORBIDDEN => ErrorCode::Forbidden,
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        s if s.is_server_error() => ErrorCode::Unavailable,
        _ => ErrorCode::InternalError,
    }
}
