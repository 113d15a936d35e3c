use axum::{routing::get, Router};

use super::audit_handlers;
use crate::state::AppState;

pub fn audit_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(audit_handlers::get_settings).put(audit_handlers::update_settings),
    )
}
