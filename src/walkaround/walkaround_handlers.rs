use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::walkaround_dto::{WalkaroundFilters, WalkaroundView};
use crate::{error::Result, middleware::Session, state::AppState};

/// Walkaround inspections, newest first
#[utoipa::path(
    get,
    path = "/dashboard/walkarounds",
    params(
        ("vehicle" = Option<i64>, Query, description = "Only this vehicle"),
        ("status" = Option<String>, Query, description = "pass, fail or defect")
    ),
    responses((status = 200, description = "Inspections", body = [WalkaroundView])),
    tag = "walkarounds"
)]
pub async fn list_walkarounds(
    State(state): State<AppState>,
    session: Session,
    Query(filters): Query<WalkaroundFilters>,
) -> Result<Json<Vec<WalkaroundView>>> {
    let mut walkarounds = state
        .walkaround_repository
        .find_all(session.token(), &filters)
        .await?;
    walkarounds.sort_by(|a, b| b.inspected_at.cmp(&a.inspected_at));

    Ok(Json(walkarounds.into_iter().map(WalkaroundView::from).collect()))
}

#[utoipa::path(
    get,
    path = "/dashboard/walkarounds/{id}",
    params(("id" = i64, Path, description = "Walkaround ID")),
    responses(
        (status = 200, description = "Inspection", body = WalkaroundView),
        (status = 404, description = "Walkaround not found")
    ),
    tag = "walkarounds"
)]
pub async fn get_walkaround(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<WalkaroundView>> {
    let walkaround = state
        .walkaround_repository
        .find_by_id(session.token(), id)
        .await?;
    Ok(Json(walkaround.into()))
}
