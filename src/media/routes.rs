use axum::{extract::DefaultBodyLimit, routing::post, Router};

use super::media_handlers::{self, MAX_IMAGE_BYTES};
use crate::state::AppState;

pub fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(media_handlers::upload_image))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES))
}
