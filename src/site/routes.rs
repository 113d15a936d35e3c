use axum::{routing::get, Router};

use super::site_handlers;
use crate::state::AppState;

pub fn site_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(site_handlers::list_sites).post(site_handlers::create_site),
        )
        .route(
            "/:id",
            get(site_handlers::get_site)
                .put(site_handlers::update_site)
                .delete(site_handlers::delete_site),
        )
}
