use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{
        CreateOrderRequest, ListOrdersQuery, ListOrdersResponse, OrderEnvelope,
        UpdateOrderRequest,
    },
    repo_types::OrderStats,
    services,
};
use crate::{
    auth::AdminUser,
    error::AppError,
    extract::{AppJson, AppPath, AppQuery},
    state::AppState,
};

/// Checkout is public; every other order route needs an admin token.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/stats", get(order_stats))
        .route("/orders/:id", put(update_order).delete(delete_order))
}

#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderEnvelope>), AppError> {
    let order = services::create_order(state.orders.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(OrderEnvelope { order })))
}

#[instrument(skip(state, _admin))]
pub async fn list_orders(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppQuery(query): AppQuery<ListOrdersQuery>,
) -> Result<Json<ListOrdersResponse>, AppError> {
    let res = services::list_orders(state.orders.as_ref(), query).await?;
    Ok(Json(res))
}

#[instrument(skip(state, _admin))]
pub async fn order_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<OrderStats>, AppError> {
    Ok(Json(services::order_stats(state.orders.as_ref()).await?))
}

#[instrument(skip(state, admin, payload), fields(admin_id = admin.0.admin_id))]
pub async fn update_order(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateOrderRequest>,
) -> Result<Json<OrderEnvelope>, AppError> {
    let order = services::update_order(state.orders.as_ref(), id, payload).await?;
    Ok(Json(OrderEnvelope { order }))
}

#[instrument(skip(state, admin), fields(admin_id = admin.0.admin_id))]
pub async fn delete_order(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    services::delete_order(state.orders.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
