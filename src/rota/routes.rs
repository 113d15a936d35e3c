use axum::{
    routing::{get, put},
    Router,
};

use super::rota_handlers;
use crate::state::AppState;

pub fn rota_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(rota_handlers::list_rotas))
        .route("/shifts", get(rota_handlers::list_shifts))
        .route("/:rota_id", get(rota_handlers::get_grid))
        .route("/:rota_id/grid", get(rota_handlers::get_grid_html))
        .route(
            "/:rota_id/cells/:cell_id/edit",
            get(rota_handlers::edit_cell),
        )
        .route(
            "/:rota_id/cells/:cell_id",
            put(rota_handlers::update_cell),
        )
}
