use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use super::dto::{LoginRequest, SignupResponse, UserPayload};
use super::repo::{self, User};
use crate::assignments::service::assign_full_catalog;
use crate::error::ApiError;
use crate::ids;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(repo::list(&state.db).await?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<User>, ApiError> {
    match repo::find_by_credentials(&state.db, &payload.username, &payload.password).await? {
        Some(user) => {
            info!(user_id = %user.id, username = %user.username, "login");
            Ok(Json(user))
        }
        None => {
            warn!(username = %payload.username, "login rejected");
            Err(ApiError::Unauthorized)
        }
    }
}

/// Creates a client, then grants it visibility into the whole catalog. If the
/// grant fails fatally the just-created user is deleted again so no account is
/// left without any product visibility (compensating delete, not a transaction).
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let id = ids::client_id();
    let user = repo::insert(&state.db, &id, &payload).await?;

    let summary = match assign_full_catalog(&state.db, &user.id).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, user_id = %user.id, "catalog assignment failed, removing user");
            if let Err(del) = repo::delete(&state.db, &user.id).await {
                error!(error = %del, user_id = %user.id, "compensating user delete failed");
            }
            return Err(e.into());
        }
    };

    info!(user_id = %user.id, assigned = summary.assigned, "client created");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user,
            assigned_products: summary.assigned,
            assignment_failures: summary.failures,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<Option<User>>, ApiError> {
    Ok(Json(repo::update(&state.db, &id, &payload).await?))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    repo::delete(&state.db, &id).await?;
    Ok(Json(json!({ "success": true })))
}
