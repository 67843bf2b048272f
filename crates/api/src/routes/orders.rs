//! Order creation, lifecycle, and query endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use common::{MenuItemId, OrderId, UserId};
use domain::{
    CreateOrder, Order, OrderItem, OrderLine, OrderNumber, OrderStatus, OrderType,
    UuidOrderNumberGenerator,
};
use order_store::OrderStore;
use queries::OrderQueries;
use serde::{Deserialize, Serialize};
use workflow::{InMemoryMenuCatalog, InMemoryUserDirectory, OrderWorkflow};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore> {
    pub workflow:
        OrderWorkflow<S, InMemoryMenuCatalog, InMemoryUserDirectory, UuidOrderNumberGenerator>,
    pub queries: OrderQueries<S>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: i64,
    pub order_type: Option<String>,
    pub delivery_address: String,
    pub phone_number: String,
    pub special_instructions: Option<String>,
    pub items: Vec<OrderLineRequest>,
}

#[derive(Deserialize)]
pub struct OrderLineRequest {
    pub menu_item_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub order_number: String,
    pub user_id: i64,
    pub total_amount_cents: i64,
    pub status: String,
    pub order_type: Option<String>,
    pub delivery_address: String,
    pub phone_number: String,
    pub special_instructions: Option<String>,
    pub estimated_delivery_time: String,
    pub created_at: String,
    pub updated_at: String,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub id: i64,
    pub menu_item_id: i64,
    pub menu_item_name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Serialize)]
pub struct RevenueResponse {
    pub revenue_cents: i64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let items = order
            .items
            .into_iter()
            .map(OrderItemResponse::from)
            .collect();
        OrderResponse {
            id: order.id.as_i64(),
            order_number: order.order_number.to_string(),
            user_id: order.user_id.as_i64(),
            total_amount_cents: order.total_amount.cents(),
            status: order.status.to_string(),
            order_type: order.order_type.map(|t| t.to_string()),
            delivery_address: order.delivery_address,
            phone_number: order.phone_number,
            special_instructions: order.special_instructions,
            estimated_delivery_time: order.estimated_delivery_time.to_rfc3339(),
            created_at: order.created_at.to_rfc3339(),
            updated_at: order.updated_at.to_rfc3339(),
            items,
        }
    }
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            id: item.id.as_i64(),
            menu_item_id: item.menu_item_id.as_i64(),
            menu_item_name: item.menu_item_name,
            quantity: item.quantity,
            unit_price_cents: item.unit_price.cents(),
            total_price_cents: item.total_price.cents(),
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /api/orders: validates the user and menu items, then persists a
/// new order with a frozen price snapshot.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(axum::http::StatusCode, Json<OrderResponse>), ApiError> {
    let lines: Vec<OrderLine> = req
        .items
        .iter()
        .map(|item| OrderLine::new(MenuItemId::from_i64(item.menu_item_id), item.quantity))
        .collect();

    let mut command = CreateOrder::new(
        UserId::from_i64(req.user_id),
        req.delivery_address,
        req.phone_number,
        lines,
    );
    if let Some(ref value) = req.order_type {
        let order_type = value
            .parse::<OrderType>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        command = command.with_order_type(order_type);
    }
    if let Some(instructions) = req.special_instructions {
        command = command.with_instructions(instructions);
    }

    let order = state.workflow.create_order(command).await?;
    Ok((axum::http::StatusCode::CREATED, Json(order.into())))
}

/// GET /api/orders/{id}: fetches a single order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state.queries.order(order_id).await?;
    Ok(Json(order.into()))
}

/// GET /api/orders/order-number/{order_number}: fetches a single order
/// by its business identifier.
#[tracing::instrument(skip(state))]
pub async fn get_by_number<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(order_number): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let number = OrderNumber::new(order_number);
    let order = state.queries.order_by_number(&number).await?;
    Ok(Json(order.into()))
}

/// GET /api/orders: lists all orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.queries.all_orders().await?;
    Ok(Json(to_responses(orders)))
}

/// GET /api/orders/user/{user_id}: lists a user's orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn list_for_user<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let orders = state.queries.orders_for_user(user_id).await?;
    Ok(Json(to_responses(orders)))
}

/// GET /api/orders/status/{status}: lists orders in a status, oldest first.
#[tracing::instrument(skip(state))]
pub async fn list_with_status<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let status = parse_status(&status)?;
    let orders = state.queries.orders_with_status(status).await?;
    Ok(Json(to_responses(orders)))
}

/// GET /api/orders/user/{user_id}/status/{status}: lists a user's orders
/// in a status.
#[tracing::instrument(skip(state))]
pub async fn list_for_user_with_status<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((user_id, status)): Path<(String, String)>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let status = parse_status(&status)?;
    let orders = state
        .queries
        .orders_for_user_with_status(user_id, status)
        .await?;
    Ok(Json(to_responses(orders)))
}

/// GET /api/orders/date-range: lists orders created inside an inclusive
/// RFC 3339 window.
#[tracing::instrument(skip(state))]
pub async fn by_date_range<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let start = parse_date(&range.start_date, "start_date")?;
    let end = parse_date(&range.end_date, "end_date")?;
    let orders = state.queries.orders_created_between(start, end).await?;
    Ok(Json(to_responses(orders)))
}

/// GET /api/orders/count: returns the total number of orders.
#[tracing::instrument(skip(state))]
pub async fn count<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state.queries.count_orders().await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/orders/revenue: sums delivered-order totals inside an
/// inclusive RFC 3339 window.
#[tracing::instrument(skip(state))]
pub async fn revenue<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<RevenueResponse>, ApiError> {
    let start = parse_date(&range.start_date, "start_date")?;
    let end = parse_date(&range.end_date, "end_date")?;
    let revenue = state.queries.revenue_between(start, end).await?;
    Ok(Json(RevenueResponse {
        revenue_cents: revenue.cents(),
    }))
}

/// PUT /api/orders/{id}/status: advances an order to the requested status.
#[tracing::instrument(skip(state))]
pub async fn update_status<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let target = parse_status(&query.status)?;
    let order = state.workflow.update_status(order_id, target).await?;
    Ok(Json(order.into()))
}

/// DELETE /api/orders/{id}/cancel: cancels an order that has not yet
/// entered preparation.
#[tracing::instrument(skip(state))]
pub async fn cancel<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<axum::http::StatusCode, ApiError> {
    let order_id = parse_order_id(&id)?;
    state.workflow.cancel_order(order_id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

fn to_responses(orders: Vec<Order>) -> Vec<OrderResponse> {
    orders.into_iter().map(OrderResponse::from).collect()
}

fn parse_order_id(value: &str) -> Result<OrderId, ApiError> {
    value
        .parse::<i64>()
        .map(OrderId::from_i64)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order ID: {e}")))
}

fn parse_user_id(value: &str) -> Result<UserId, ApiError> {
    value
        .parse::<i64>()
        .map(UserId::from_i64)
        .map_err(|e| ApiError::BadRequest(format!("Invalid user ID: {e}")))
}

fn parse_status(value: &str) -> Result<OrderStatus, ApiError> {
    value
        .parse::<OrderStatus>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn parse_date(value: &str, field: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApiError::BadRequest(format!("Invalid {field}: {e}")))
}
