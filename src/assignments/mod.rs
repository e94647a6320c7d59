mod dto;
mod handlers;
pub(crate) mod repo;
pub(crate) mod service;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/assignments",
            get(handlers::list_assignments).post(handlers::create_assignment),
        )
        .route("/assignments/:client_id", get(handlers::client_products))
        .route(
            "/assignments/:client_id/:product_id",
            delete(handlers::delete_assignment),
        )
}
