use axum::{routing::get, Router};

use super::tracking_handlers;
use crate::state::AppState;

pub fn tracking_routes() -> Router<AppState> {
    Router::new().route("/", get(tracking_handlers::live_positions))
}
