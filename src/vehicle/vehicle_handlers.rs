use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use validator::Validate;

use super::vehicle_dto::{VehicleRequest, VehicleView};
use crate::{
    error::Result, middleware::Session, state::AppState, tracking::tracking_service::sync_vehicle,
};

/// List vehicles with status colours and expiry badges
#[utoipa::path(
    get,
    path = "/dashboard/vehicles",
    responses((status = 200, description = "Vehicles", body = [VehicleView])),
    tag = "vehicles"
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<VehicleView>>> {
    let (vehicles, settings) = tokio::join!(
        state.vehicle_repository.find_all(session.token()),
        state.audit_repository.find_or_default(session.token()),
    );
    let today = Utc::now().date_naive();

    Ok(Json(
        vehicles?
            .into_iter()
            .map(|v| VehicleView::new(v, &settings, today))
            .collect(),
    ))
}

/// Get a vehicle
#[utoipa::path(
    get,
    path = "/dashboard/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle", body = VehicleView),
        (status = 404, description = "Vehicle not found")
    ),
    tag = "vehicles"
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<VehicleView>> {
    let (vehicle, settings) = tokio::join!(
        state.vehicle_repository.find_by_id(session.token(), id),
        state.audit_repository.find_or_default(session.token()),
    );

    Ok(Json(VehicleView::new(vehicle?, &settings, Utc::now().date_naive())))
}

/// Add a vehicle
#[utoipa::path(
    post,
    path = "/dashboard/vehicles",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = Vehicle),
        (status = 422, description = "Validation error")
    ),
    tag = "vehicles"
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<VehicleRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let vehicle = state
        .vehicle_repository
        .create(session.token(), &payload)
        .await?;

    tracing::info!("Vehicle {} created", vehicle.registration);
    sync_vehicle(&state, session.token(), &vehicle).await;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Replace a vehicle
#[utoipa::path(
    put,
    path = "/dashboard/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle ID")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = Vehicle),
        (status = 422, description = "Validation error")
    ),
    tag = "vehicles"
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(payload): Json<VehicleRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let vehicle = state
        .vehicle_repository
        .update(session.token(), id, &payload)
        .await?;

    sync_vehicle(&state, session.token(), &vehicle).await;
    Ok(Json(vehicle))
}

/// Delete a vehicle
#[utoipa::path(
    delete,
    path = "/dashboard/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 204, description = "Vehicle deleted"),
        (status = 404, description = "Vehicle not found")
    ),
    tag = "vehicles"
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.vehicle_repository.delete(session.token(), id).await?;
    state.tracking.remove(id);
    Ok(StatusCode::NO_CONTENT)
}
