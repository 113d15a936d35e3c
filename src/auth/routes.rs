use axum::{
    routing::{get, post},
    Router,
};

use super::auth_handlers;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(auth_handlers::login_page).post(auth_handlers::login),
        )
        .route("/register", post(auth_handlers::register))
        .route("/forgot-password", post(auth_handlers::forgot_password))
        .route("/reset-password", post(auth_handlers::reset_password))
        .route("/logout", post(auth_handlers::logout))
}
