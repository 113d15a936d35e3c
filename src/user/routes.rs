use axum::{routing::get, Router};

use super::user_handlers;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(user_handlers::list_users))
        .route("/users/:id", get(user_handlers::get_user))
        .route("/roles", get(user_handlers::list_roles))
}
