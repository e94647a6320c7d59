//! Order submission: persist, reload, render the order form, notify the
//! operator, return the stored order. Persistence is the only step allowed to
//! fail the request; everything after it degrades to log output.

use tracing::error;

use super::dto::{format_order_date, CreateOrderRequest, OrderResponse};
use super::{grouping, notify, repo};
use crate::error::ApiError;
use crate::ids;
use crate::pdf;
use crate::products;
use crate::state::AppState;

pub async fn submit_order(
    state: &AppState,
    req: CreateOrderRequest,
) -> Result<OrderResponse, ApiError> {
    if req.client_id.trim().is_empty() {
        return Err(ApiError::BadRequest("clientId is required".into()));
    }

    let order_id = ids::order_id();
    repo::insert_order(&state.db, &order_id, &req).await?;
    for item in &req.items {
        repo::insert_item(&state.db, &order_id, item).await?;
    }

    // Reload so the response reflects exactly what is stored, including the
    // server-assigned submission timestamp.
    let (order, items) = repo::fetch(&state.db, &order_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("order {order_id} missing after insert"))
        .map_err(ApiError::Internal)?;

    let categories = products::repo::category_map(&state.db).await?;
    let sections = grouping::section_items(&items, &categories);

    match pdf::render_order_pdf(&order, &sections, &state.config.supplier) {
        Ok(bytes) => {
            notify::dispatch(state.mailer.as_ref(), &state.config, &order, &sections, bytes)
                .await;
        }
        Err(e) => {
            error!(error = %e, order_id = %order.id, "order form rendering failed, skipping notification");
        }
    }

    Ok(OrderResponse {
        date: format_order_date(order.order_date),
        order,
        items,
    })
}
