use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use super::dto::{format_order_date, CreateOrderRequest, OrderResponse};
use super::{repo, service};
use crate::error::ApiError;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = repo::list(&state.db).await?;
    let mut out = Vec::with_capacity(orders.len());
    for order in orders {
        let items = repo::items_for_order(&state.db, &order.id).await?;
        out.push(OrderResponse {
            date: format_order_date(order.order_date),
            order,
            items,
        });
    }
    Ok(Json(out))
}

#[instrument(skip(state, req))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order = service::submit_order(&state, req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[instrument(skip(state))]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    repo::delete(&state.db, &id).await?;
    Ok(Json(json!({ "success": true, "message": "Order deleted" })))
}
