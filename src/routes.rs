use crate::{
    audit::{self, routes::audit_routes},
    auth::{self, routes::auth_routes},
    dashboard::{self, routes::dashboard_routes},
    display::BadgeColor,
    media::{self, routes::media_routes},
    middleware::{root_redirect, session_middleware},
    notification::{self, routes::notification_routes},
    rota::{self, routes::rota_routes},
    site::{self, routes::site_routes},
    state::AppState,
    tracking::{self, routes::tracking_routes},
    user::{self, routes::user_routes},
    vehicle::{self, routes::vehicle_routes},
    walkaround::{self, routes::walkaround_routes},
    websocket::ConnectionState,
};
use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::auth_handlers::login,
        auth::auth_handlers::register,
        auth::auth_handlers::forgot_password,
        auth::auth_handlers::reset_password,
        dashboard::dashboard_handlers::summary,
        vehicle::vehicle_handlers::list_vehicles,
        vehicle::vehicle_handlers::get_vehicle,
        vehicle::vehicle_handlers::create_vehicle,
        vehicle::vehicle_handlers::update_vehicle,
        vehicle::vehicle_handlers::delete_vehicle,
        site::site_handlers::list_sites,
        site::site_handlers::get_site,
        site::site_handlers::create_site,
        site::site_handlers::update_site,
        site::site_handlers::delete_site,
        user::user_handlers::list_users,
        user::user_handlers::get_user,
        user::user_handlers::list_roles,
        walkaround::walkaround_handlers::list_walkarounds,
        walkaround::walkaround_handlers::get_walkaround,
        audit::audit_handlers::get_settings,
        audit::audit_handlers::update_settings,
        media::media_handlers::upload_image,
        rota::rota_handlers::list_rotas,
        rota::rota_handlers::list_shifts,
        rota::rota_handlers::get_grid,
        rota::rota_handlers::edit_cell,
        rota::rota_handlers::update_cell,
        tracking::tracking_handlers::live_positions,
        notification::notification_handlers::list_notifications,
        notification::notification_handlers::notification_status,
        notification::notification_handlers::mark_notification_read,
        notification::notification_handlers::send_test_message,
        notification::notification_handlers::notification_stream,
    ),
    components(
        schemas(
            auth::auth_dto::LoginRequest,
            auth::auth_dto::RegisterRequest,
            auth::auth_dto::ForgotPasswordRequest,
            auth::auth_dto::ResetPasswordRequest,
            auth::auth_dto::AuthResponse,
            auth::auth_dto::MessageResponse,
            dashboard::DashboardSummary,
            BadgeColor,
            ConnectionState,
            vehicle::Vehicle,
            vehicle::VehicleStatus,
            vehicle::VehicleView,
            vehicle::vehicle_dto::VehicleRequest,
            audit::AuditExpirySettings,
            audit::ExpiryBadge,
            audit::ExpiryStatus,
            audit::audit_dto::UpdateAuditExpiryRequest,
            site::Site,
            site::site_dto::SiteRequest,
            user::User,
            user::Role,
            user::user_models::RoleRef,
            user::user_dto::UserView,
            walkaround::Walkaround,
            walkaround::WalkaroundStatus,
            walkaround::walkaround_models::Defect,
            walkaround::walkaround_dto::WalkaroundView,
            media::ImageUpload,
            media::MediaUpload,
            rota::rota_models::Shift,
            rota::rota_models::RotaUser,
            rota::rota_models::ChildRotaSummary,
            rota::grid::RotaGrid,
            rota::grid::WeekBlock,
            rota::grid::DayRow,
            rota::grid::GridCell,
            rota::grid::ShiftCard,
            rota::rota_dto::ShiftEditForm,
            rota::rota_dto::ShiftEditRejected,
            rota::rota_handlers::ShiftEditView,
            tracking::VehiclePosition,
            notification::Notification,
            notification::NotificationEvent,
            notification::notification_dto::NotificationList,
            notification::notification_dto::NotificationStatus,
            notification::notification_dto::TestMessageRequest,
        )
    ),
    tags(
        (name = "auth", description = "Sign in, registration and password reset"),
        (name = "dashboard", description = "Fleet overview"),
        (name = "vehicles", description = "Vehicle records"),
        (name = "sites", description = "Depots and sites"),
        (name = "users", description = "Drivers, staff and roles"),
        (name = "walkarounds", description = "Pre-trip inspections"),
        (name = "audit", description = "Document expiry warnings"),
        (name = "media", description = "Image uploads"),
        (name = "rota", description = "Staff rota grid and shift editing"),
        (name = "tracking", description = "Live vehicle positions"),
        (name = "notifications", description = "Notification socket relay")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Cookie(
                        utoipa::openapi::security::ApiKeyValue::new("access_token"),
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Everything under /dashboard needs a session
    let dashboard = Router::new()
        .merge(dashboard_routes())
        .merge(user_routes())
        .nest("/vehicles", vehicle_routes())
        .nest("/sites", site_routes())
        .nest("/walkarounds", walkaround_routes())
        .nest("/audit-expiry", audit_routes())
        .nest("/media", media_routes())
        .nest("/rota", rota_routes())
        .nest("/tracking", tracking_routes())
        .nest("/notifications", notification_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root_redirect))
        .merge(auth_routes())
        .nest("/dashboard", dashboard)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_upstream, test_state};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_every_dashboard_page_requires_a_session() {
        let base = spawn_upstream(Router::new()).await;
        let app = create_router(test_state(&base));

        for uri in [
            "/dashboard",
            "/dashboard/vehicles",
            "/dashboard/sites",
            "/dashboard/users",
            "/dashboard/roles",
            "/dashboard/walkarounds",
            "/dashboard/audit-expiry",
            "/dashboard/rota",
            "/dashboard/rota/5/grid",
            "/dashboard/tracking",
            "/dashboard/notifications",
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
            assert_eq!(response.headers()[header::LOCATION], "/login", "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let base = spawn_upstream(Router::new()).await;
        let app = create_router(test_state(&base));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let upload = &doc["paths"]["/dashboard/media/upload"]["post"]["requestBody"]["content"]
            ["multipart/form-data"]["schema"];
        assert_eq!(upload["$ref"], "#/components/schemas/ImageUpload");
        assert_eq!(
            doc["components"]["schemas"]["ImageUpload"]["properties"]["image"]["format"],
            "binary"
        );
    }
}
