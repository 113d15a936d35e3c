use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::{
    grid::RotaGrid,
    render::render_grid_html,
    rota_dto::{RotaQuery, ShiftEditForm, ShiftEditRejected},
    rota_models::{ChildRotaSummary, Shift},
    rota_service::SaveOutcome,
};
use crate::{error::Result, middleware::Session, state::AppState};

/// Pre-filled edit dialog plus the shifts it can pick from.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShiftEditView {
    pub rota_id: i64,
    pub cell_id: i64,
    pub form: ShiftEditForm,
    pub shifts: Vec<Shift>,
}

/// List child rotas
#[utoipa::path(
    get,
    path = "/dashboard/rota",
    responses(
        (status = 200, description = "Child rotas", body = [ChildRotaSummary]),
        (status = 303, description = "Not signed in")
    ),
    tag = "rota"
)]
pub async fn list_rotas(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<ChildRotaSummary>>> {
    let rotas = state.rota_service.list_rotas(session.token()).await?;
    Ok(Json(rotas))
}

/// Shifts available in the edit dialog
#[utoipa::path(
    get,
    path = "/dashboard/rota/shifts",
    responses((status = 200, description = "Available shifts", body = [Shift])),
    tag = "rota"
)]
pub async fn list_shifts(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Shift>>> {
    let shifts = state.rota_service.list_shifts(session.token()).await?;
    Ok(Json(shifts))
}

/// Rota grid grouped into calendar weeks
#[utoipa::path(
    get,
    path = "/dashboard/rota/{rota_id}",
    params(
        ("rota_id" = i64, Path, description = "Child rota id"),
        ("month" = Option<String>, Query, description = "Month to show (YYYY-MM)")
    ),
    responses(
        (status = 200, description = "Rota grid", body = RotaGrid),
        (status = 400, description = "Invalid month"),
        (status = 404, description = "Rota not found")
    ),
    tag = "rota"
)]
pub async fn get_grid(
    State(state): State<AppState>,
    session: Session,
    Path(rota_id): Path<i64>,
    Query(query): Query<RotaQuery>,
) -> Result<Json<RotaGrid>> {
    let grid = state
        .rota_service
        .grid(session.token(), rota_id, query.month.as_deref())
        .await?;
    Ok(Json(grid))
}

pub async fn get_grid_html(
    State(state): State<AppState>,
    session: Session,
    Path(rota_id): Path<i64>,
    Query(query): Query<RotaQuery>,
) -> Result<Html<String>> {
    let grid = state
        .rota_service
        .grid(session.token(), rota_id, query.month.as_deref())
        .await?;
    Ok(Html(render_grid_html(&grid)))
}

/// Open the edit dialog for a cell
#[utoipa::path(
    get,
    path = "/dashboard/rota/{rota_id}/cells/{cell_id}/edit",
    params(
        ("rota_id" = i64, Path, description = "Child rota id"),
        ("cell_id" = i64, Path, description = "Cell id")
    ),
    responses(
        (status = 200, description = "Dialog values", body = ShiftEditView),
        (status = 404, description = "Cell not found")
    ),
    tag = "rota"
)]
pub async fn edit_cell(
    State(state): State<AppState>,
    session: Session,
    Path((rota_id, cell_id)): Path<(i64, i64)>,
) -> Result<Json<ShiftEditView>> {
    let (editor, shifts) = tokio::try_join!(
        state.rota_service.editor(session.token(), rota_id, cell_id),
        state.rota_service.list_shifts(session.token()),
    )?;

    Ok(Json(ShiftEditView {
        rota_id,
        cell_id: editor.cell_id(),
        form: editor.form().clone(),
        shifts,
    }))
}

/// Save a cell: shift, salary and hours in one update
#[utoipa::path(
    put,
    path = "/dashboard/rota/{rota_id}/cells/{cell_id}",
    params(
        ("rota_id" = i64, Path, description = "Child rota id"),
        ("cell_id" = i64, Path, description = "Cell id"),
        ("month" = Option<String>, Query, description = "Month to return (YYYY-MM)")
    ),
    request_body = ShiftEditForm,
    responses(
        (status = 200, description = "Saved; refreshed rota grid", body = RotaGrid),
        (status = 422, description = "Update refused, dialog stays open", body = ShiftEditRejected)
    ),
    tag = "rota"
)]
pub async fn update_cell(
    State(state): State<AppState>,
    session: Session,
    Path((rota_id, cell_id)): Path<(i64, i64)>,
    Query(query): Query<RotaQuery>,
    Json(form): Json<ShiftEditForm>,
) -> Result<Response> {
    let outcome = state
        .rota_service
        .save_cell(session.token(), rota_id, cell_id, form, query.month.as_deref())
        .await?;

    Ok(match outcome {
        SaveOutcome::Saved(grid) => Json(grid).into_response(),
        SaveOutcome::Rejected { error, form } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ShiftEditRejected { error, form }),
        )
            .into_response(),
    })
}
