use axum::{routing::get, Router};

use super::dashboard_handlers;
use crate::state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard_handlers::summary))
}
