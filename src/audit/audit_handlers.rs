use axum::{extract::State, Json};
use validator::Validate;

use super::{audit_dto::UpdateAuditExpiryRequest, audit_models::AuditExpirySettings};
use crate::{error::Result, middleware::Session, state::AppState};

/// Current expiry warning windows
#[utoipa::path(
    get,
    path = "/dashboard/audit-expiry",
    responses((status = 200, description = "Expiry settings", body = AuditExpirySettings)),
    tag = "audit"
)]
pub async fn get_settings(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<AuditExpirySettings>> {
    let settings = state.audit_repository.find(session.token()).await?;
    Ok(Json(settings))
}

/// Update expiry warning windows
#[utoipa::path(
    put,
    path = "/dashboard/audit-expiry",
    request_body = UpdateAuditExpiryRequest,
    responses(
        (status = 200, description = "Saved settings", body = AuditExpirySettings),
        (status = 422, description = "Validation error")
    ),
    tag = "audit"
)]
pub async fn update_settings(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateAuditExpiryRequest>,
) -> Result<Json<AuditExpirySettings>> {
    payload.validate()?;

    let settings = state
        .audit_repository
        .update(session.token(), &payload)
        .await?;

    tracing::info!("Audit expiry settings updated by {}", session.key());
    Ok(Json(settings))
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
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_update_is_validated_before_upstream() {
        let upstream = Router::new().route(
            "/api/audit-expiry/",
            get(|| async { Json(json!({})) })
                .put(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_upstream(upstream).await;
        let app = create_router(test_state(&base));

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/dashboard/audit-expiry")
                    .header(header::COOKIE, format!("access_token={}", mint_token(900, "s")))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "mot_warning_days": 400,
                            "tax_warning_days": 30,
                            "insurance_warning_days": 30,
                            "licence_warning_days": 30
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_get_settings_passes_bearer_token() {
        let token = mint_token(900, "s");
        let expected = format!("Bearer {}", token);
        let upstream = Router::new().route(
            "/api/audit-expiry/",
            get(move |headers: axum::http::HeaderMap| {
                let expected = expected.clone();
                async move {
                    assert_eq!(headers[header::AUTHORIZATION], expected.as_str());
                    Json(json!({
                        "id": 1,
                        "mot_warning_days": 14,
                        "tax_warning_days": 21,
                        "insurance_warning_days": 28,
                        "licence_warning_days": 90
                    }))
                }
            }),
        );
        let base = spawn_upstream(upstream).await;
        let app = create_router(test_state(&base));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/dashboard/audit-expiry")
                    .header(header::COOKIE, format!("access_token={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["mot_warning_days"], json!(14));
    }
}
