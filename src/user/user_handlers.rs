use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use super::{user_dto::UserView, user_models::Role};
use crate::{error::Result, middleware::Session, state::AppState};

/// Drivers and staff
#[utoipa::path(
    get,
    path = "/dashboard/users",
    responses((status = 200, description = "Users with licence badges", body = [UserView])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<UserView>>> {
    let token = session.token();
    let (users, roles, settings) = tokio::join!(
        state.user_repository.find_all(token),
        state.user_repository.find_roles(token),
        state.audit_repository.find_or_default(token),
    );
    let roles = roles.unwrap_or_else(|e| {
        tracing::warn!("Role names unavailable: {}", e);
        Vec::new()
    });
    let today = Utc::now().date_naive();

    Ok(Json(
        users?
            .into_iter()
            .map(|u| UserView::new(u, &roles, &settings, today))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/dashboard/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserView),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<UserView>> {
    let token = session.token();
    let (user, roles, settings) = tokio::join!(
        state.user_repository.find_by_id(token, id),
        state.user_repository.find_roles(token),
        state.audit_repository.find_or_default(token),
    );

    Ok(Json(UserView::new(
        user?,
        &roles.unwrap_or_default(),
        &settings,
        Utc::now().date_naive(),
    )))
}

#[utoipa::path(
    get,
    path = "/dashboard/roles",
    responses((status = 200, description = "Access roles", body = [Role])),
    tag = "users"
)]
pub async fn list_roles(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Role>>> {
    let roles = state.user_repository.find_roles(session.token()).await?;
    Ok(Json(roles))
}
