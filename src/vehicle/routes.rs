use axum::{routing::get, Router};

use super::vehicle_handlers;
use crate::state::AppState;

pub fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(vehicle_handlers::list_vehicles).post(vehicle_handlers::create_vehicle),
        )
        .route(
            "/:id",
            get(vehicle_handlers::get_vehicle)
                .put(vehicle_handlers::update_vehicle)
                .delete(vehicle_handlers::delete_vehicle),
        )
}
