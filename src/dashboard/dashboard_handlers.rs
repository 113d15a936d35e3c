use axum::{extract::State, Json};
use chrono::Utc;

use super::dashboard_dto::DashboardSummary;
use crate::{
    error::Result,
    middleware::Session,
    state::AppState,
    vehicle::{VehicleStatus, VehicleView},
    walkaround::walkaround_dto::WalkaroundFilters,
};

/// Fleet overview
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Fleet overview", body = DashboardSummary),
        (status = 303, description = "Not signed in")
    ),
    tag = "dashboard"
)]
pub async fn summary(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<DashboardSummary>> {
    let token = session.token();
    let filters = WalkaroundFilters::default();

    let (fetched, settings) = tokio::join!(
        async {
            tokio::try_join!(
                state.vehicle_repository.find_all(token),
                state.site_repository.find_all(token),
                state.walkaround_repository.find_all(token, &filters),
            )
        },
        state.audit_repository.find_or_default(token),
    );
    let (vehicles, sites, walkarounds) = fetched?;

    let today = Utc::now().date_naive();
    let active_vehicles = vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::Active)
        .count();
    let vehicle_count = vehicles.len();
    let vehicles_needing_attention = vehicles
        .into_iter()
        .map(|v| VehicleView::new(v, &settings, today))
        .filter(VehicleView::needs_attention)
        .count();

    let center = state
        .notification_hub
        .ensure(&session.key(), token)
        .center()
        .clone();

    Ok(Json(DashboardSummary {
        vehicles: vehicle_count,
        active_vehicles,
        vehicles_needing_attention,
        sites: sites.len(),
        walkarounds: walkarounds.len(),
        failed_walkarounds: walkarounds.iter().filter(|w| w.status.is_failure()).count(),
        unread_notifications: center.unread_count(),
        notification_connection: center.state(),
    }))
}
