use axum::{routing::get, Router};

use super::walkaround_handlers;
use crate::state::AppState;

pub fn walkaround_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(walkaround_handlers::list_walkarounds))
        .route("/:id", get(walkaround_handlers::get_walkaround))
}
