use axum::{extract::State, Json};

use super::tracking_models::VehiclePosition;
use crate::{error::Result, middleware::Session, state::AppState};

/// Live vehicle positions
#[utoipa::path(
    get,
    path = "/dashboard/tracking",
    responses((status = 200, description = "Positions, sorted by registration", body = [VehiclePosition])),
    tag = "tracking"
)]
pub async fn live_positions(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<VehiclePosition>>> {
    if state.tracking.is_empty() {
        let (vehicles, sites) = tokio::try_join!(
            state.vehicle_repository.find_all(session.token()),
            state.site_repository.find_all(session.token()),
        )?;
        let added = state
            .tracking
            .seed(&vehicles, &sites, &mut rand::thread_rng());
        tracing::info!("Tracking {} vehicles", added);
    }

    Ok(Json(state.tracking.snapshot()))
}
