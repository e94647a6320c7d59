use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use super::dto::AssignmentPayload;
use super::repo::{self, InsertOutcome};
use crate::error::ApiError;
use crate::products::repo::Product;
use crate::state::AppState;

/// All assignments reshaped into client id -> list of product ids.
#[instrument(skip(state))]
pub async fn list_assignments(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Vec<String>>>, ApiError> {
    let rows = repo::list_all(&state.db).await?;
    let mut by_client: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (client_id, product_id) in rows {
        by_client.entry(client_id).or_default().push(product_id);
    }
    Ok(Json(by_client))
}

#[instrument(skip(state))]
pub async fn client_products(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(repo::products_for_client(&state.db, &client_id).await?))
}

/// Idempotent create: a pre-existing pair answers 200 instead of erroring.
#[instrument(skip(state))]
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(payload): Json<AssignmentPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    match repo::insert(&state.db, &payload.client_id, &payload.product_id).await? {
        InsertOutcome::Inserted => Ok((StatusCode::CREATED, Json(json!({ "success": true })))),
        InsertOutcome::Duplicate => Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Assignment already exists" })),
        )),
    }
}

#[instrument(skip(state))]
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path((client_id, product_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    repo::delete(&state.db, &client_id, &product_id).await?;
    Ok(Json(json!({ "success": true })))
}
