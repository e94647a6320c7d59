mod dto;
mod handlers;
pub(crate) mod repo;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route("/users/login", post(handlers::login))
        .route(
            "/users/:id",
            put(handlers::update_user).delete(handlers::delete_user),
        )
}
