pub(crate) mod dto;
pub(crate) mod grouping;
mod handlers;
mod notify;
pub(crate) mod repo;
mod service;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route("/orders/:id", delete(handlers::delete_order))
}
