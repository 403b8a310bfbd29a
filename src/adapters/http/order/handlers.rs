//! HTTP handlers for order endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::error_response;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::application::handlers::order::{
    GetOrderHandler, GetOrderQuery, ListAllOrdersHandler, ListUserOrdersHandler,
    ListUserOrdersQuery, OrderItemInput, PlaceOrderCommand, PlaceOrderHandler,
    UpdateOrderStatusCommand, UpdateOrderStatusHandler,
};
use crate::domain::foundation::{OrderId, ProductId};
use crate::domain::order::{OrderError, StatusTransitionPolicy};
use crate::ports::{CartRepository, OrderRepository};

use super::dto::{OrderItemRequest, PlaceOrderRequest, UpdateStatusRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies for the order endpoints.
#[derive(Clone)]
pub struct OrderAppState {
    pub orders: Arc<dyn OrderRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub status_policy: StatusTransitionPolicy,
}

impl OrderAppState {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        carts: Arc<dyn CartRepository>,
        status_policy: StatusTransitionPolicy,
    ) -> Self {
        Self {
            orders,
            carts,
            status_policy,
        }
    }

    pub fn place_order_handler(&self) -> PlaceOrderHandler {
        PlaceOrderHandler::new(self.orders.clone(), self.carts.clone())
    }

    pub fn list_user_orders_handler(&self) -> ListUserOrdersHandler {
        ListUserOrdersHandler::new(self.orders.clone())
    }

    pub fn get_order_handler(&self) -> GetOrderHandler {
        GetOrderHandler::new(self.orders.clone())
    }

    pub fn list_all_orders_handler(&self) -> ListAllOrdersHandler {
        ListAllOrdersHandler::new(self.orders.clone())
    }

    pub fn update_status_handler(&self) -> UpdateOrderStatusHandler {
        UpdateOrderStatusHandler::new(self.orders.clone(), self.status_policy)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Customer Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/orders - Place an order from the submitted checkout
pub async fn place_order(
    State(state): State<OrderAppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<PlaceOrderRequest>,
) -> Result<impl IntoResponse, OrderApiError> {
    let items = request
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| to_item_input(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let cmd = PlaceOrderCommand {
        user_id: user.id,
        items,
        total_amount: request.total_amount,
        shipping_address: request.shipping_address,
    };
    let order = state.place_order_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - The caller's orders, newest first
pub async fn list_my_orders(
    State(state): State<OrderAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, OrderApiError> {
    let orders = state
        .list_user_orders_handler()
        .handle(ListUserOrdersQuery { user_id: user.id })
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - One of the caller's orders
pub async fn get_order(
    State(state): State<OrderAppState>,
    RequireAuth(user): RequireAuth,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, OrderApiError> {
    let query = GetOrderQuery {
        user_id: user.id,
        order_id: parse_order_id(&order_id)?,
    };
    let order = state.get_order_handler().handle(query).await?;
    Ok(Json(order))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/orders - Every order, newest first
pub async fn list_all_orders(
    State(state): State<OrderAppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, OrderApiError> {
    let orders = state.list_all_orders_handler().handle().await?;
    Ok(Json(orders))
}

/// PATCH /api/admin/orders/:id/status - Change an order's status
pub async fn update_order_status(
    State(state): State<OrderAppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(order_id): Path<String>,
    ApiJson(request): ApiJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, OrderApiError> {
    let cmd = UpdateOrderStatusCommand {
        order_id: parse_order_id(&order_id)?,
        status: request.status,
    };
    tracing::debug!(admin = %admin.id, order_id = %cmd.order_id, "status change requested");
    let order = state.update_status_handler().handle(cmd).await?;
    Ok(Json(order))
}

fn parse_order_id(raw: &str) -> Result<OrderId, OrderError> {
    raw.parse()
        .map_err(|_| OrderError::validation("id", format!("invalid order id '{}'", raw)))
}

fn to_item_input(index: usize, item: &OrderItemRequest) -> Result<OrderItemInput, OrderError> {
    let product_id: ProductId = item.product_id.parse().map_err(|_| {
        OrderError::validation(
            format!("items[{}].productId", index),
            format!("invalid product id '{}'", item.product_id),
        )
    })?;
    Ok(OrderItemInput {
        product_id,
        quantity: item.quantity,
        price: item.price,
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// Order error as an HTTP response.
#[derive(Debug)]
pub struct OrderApiError(OrderError);

impl From<OrderError> for OrderApiError {
    fn from(err: OrderError) -> Self {
        Self(err)
    }
}

impl IntoResponse for OrderApiError {
    fn into_response(self) -> Response {
        let message = match &self.0 {
            OrderError::NotFound(_) => "Order not found".to_string(),
            OrderError::ValidationFailed { message, .. } => message.clone(),
            other => other.to_string(),
        };
        error_response(self.0.code(), message)
    }
}
