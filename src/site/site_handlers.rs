use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use super::{site_dto::SiteRequest, site_models::Site};
use crate::{error::Result, middleware::Session, state::AppState};

#[utoipa::path(
    get,
    path = "/dashboard/sites",
    responses((status = 200, description = "Sites", body = [Site])),
    tag = "sites"
)]
pub async fn list_sites(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Site>>> {
    let sites = state.site_repository.find_all(session.token()).await?;
    Ok(Json(sites))
}

#[utoipa::path(
    get,
    path = "/dashboard/sites/{id}",
    params(("id" = i64, Path, description = "Site ID")),
    responses(
        (status = 200, description = "Site", body = Site),
        (status = 404, description = "Site not found")
    ),
    tag = "sites"
)]
pub async fn get_site(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<Site>> {
    let site = state.site_repository.find_by_id(session.token(), id).await?;
    Ok(Json(site))
}

#[utoipa::path(
    post,
    path = "/dashboard/sites",
    request_body = SiteRequest,
    responses(
        (status = 201, description = "Site created", body = Site),
        (status = 422, description = "Validation error")
    ),
    tag = "sites"
)]
pub async fn create_site(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SiteRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let site = state.site_repository.create(session.token(), &payload).await?;
    Ok((StatusCode::CREATED, Json(site)))
}

#[utoipa::path(
    put,
    path = "/dashboard/sites/{id}",
    params(("id" = i64, Path, description = "Site ID")),
    request_body = SiteRequest,
    responses(
        (status = 200, description = "Site updated", body = Site),
        (status = 422, description = "Validation error")
    ),
    tag = "sites"
)]
pub async fn update_site(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(payload): Json<SiteRequest>,
) -> Result<Json<Site>> {
    payload.validate()?;

    let site = state
        .site_repository
        .update(session.token(), id, &payload)
        .await?;
    Ok(Json(site))
}

#[utoipa::path(
    delete,
    path = "/dashboard/sites/{id}",
    params(("id" = i64, Path, description = "Site ID")),
    responses((status = 204, description = "Site deleted")),
    tag = "sites"
)]
pub async fn delete_site(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.site_repository.delete(session.token(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::{
        routes::create_router,
        test_support::{mint_token, spawn_upstream, test_state},
    };
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::{delete, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn request(method: &str, uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, format!("access_token={}", mint_token(900, "s")))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_created_site() {
        let upstream = Router::new().route(
            "/api/sites/",
            post(|Json(mut body): Json<Value>| async move {
                body["id"] = json!(12);
                (StatusCode::CREATED, Json(body))
            }),
        );
        let base = spawn_upstream(upstream).await;
        let app = create_router(test_state(&base));

        let payload = json!({
            "name": "Leeds depot",
            "address": "1 Canal Wharf",
            "postcode": "LS11 5PS",
            "phone": null,
            "latitude": 53.79,
            "longitude": -1.55
        });
        let response = app
            .oneshot(request("POST", "/dashboard/sites", Body::from(payload.to_string())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["id"], json!(12));
        assert_eq!(body["name"], json!("Leeds depot"));
    }

    #[tokio::test]
    async fn test_delete_returns_no_content() {
        let upstream = Router::new().route(
            "/api/sites/3/",
            delete(|| async { StatusCode::NO_CONTENT }),
        );
        let base = spawn_upstream(upstream).await;
        let app = create_router(test_state(&base));

        let response = app
            .oneshot(request("DELETE", "/dashboard/sites/3", Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
