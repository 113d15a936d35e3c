use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use validator::Validate;

use super::{
    auth_dto::{
        AuthResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
        ResetPasswordRequest,
    },
    cookies::{self, clear_session_cookies, session_cookie, store_access_token},
    jwt::{inspect_token, TokenStatus},
};
use crate::{
    error::{AppError, Result},
    middleware::session::{channel_key, session_key, DASHBOARD_PATH, LOGIN_PATH},
    state::AppState,
};

const LOGIN_PAGE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<form id="login">
  <input name="email" type="email" placeholder="Email" required>
  <input name="password" type="password" placeholder="Password" required>
  <button type="submit">Sign in</button>
  <p id="error" role="alert"></p>
</form>
<script>
document.getElementById("login").addEventListener("submit", async (e) => {
  e.preventDefault();
  const form = new FormData(e.target);
  const res = await fetch("/login", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify(Object.fromEntries(form)),
  });
  const body = await res.json();
  if (res.ok) { window.location = body.redirect; }
  else { document.getElementById("error").textContent = body.error; }
});
</script>
</body>
</html>"#;

pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// Sign in against the fleet API and store the session cookies
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in, session cookies set", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation error")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    payload.validate()?;

    let tokens = state.auth_repository.login(&payload).await?;

    let info = match inspect_token(
        &tokens.access,
        state.config.jwt_secret.as_deref(),
        Utc::now().timestamp(),
    ) {
        TokenStatus::Valid(info) => info,
        _ => {
            return Err(AppError::Unauthorized(
                "The server issued an unusable access token".to_string(),
            ))
        }
    };

    let user_id = tokens
        .user_id
        .as_ref()
        .and_then(|v| match v {
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::String(s) => Some(s.clone()),
            _ => None,
        })
        .or_else(|| info.claims.user_id());
    let role = tokens.role.clone().or_else(|| info.claims.role.clone());

    let secure = state.config.cookie_secure;
    let mut jar = store_access_token(jar, tokens.access.clone(), info.claims.expires_at(), secure)
        .add(session_cookie(cookies::REFRESH_TOKEN, tokens.refresh, secure));
    if let Some(user_id) = &user_id {
        jar = jar.add(session_cookie(cookies::USER_ID, user_id.clone(), secure));
    }
    if let Some(role) = &role {
        jar = jar.add(session_cookie(cookies::ROLE, role.clone(), secure));
    }

    let key = channel_key(user_id.clone(), &tokens.access);
    state.notification_hub.ensure(&key, &tokens.access);

    tracing::info!("User {} signed in", key);

    Ok((
        jar,
        Json(AuthResponse {
            redirect: DASHBOARD_PATH.to_string(),
            user_id,
            role,
        }),
    ))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 422, description = "Validation error")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    state.auth_repository.register(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Account created. You can now sign in.".to_string(),
        }),
    ))
}

/// Request a password reset email
#[utoipa::path(
    post,
    path = "/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset email requested", body = MessageResponse),
        (status = 422, description = "Validation error")
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    payload.validate()?;

    state.auth_repository.forgot_password(&payload).await?;

    Ok(Json(MessageResponse {
        message: "If that email is registered, a reset link is on its way.".to_string(),
    }))
}

/// Set a new password using a reset token
#[utoipa::path(
    post,
    path = "/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 422, description = "Validation error")
    ),
    tag = "auth"
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    payload.validate()?;

    state.auth_repository.reset_password(&payload).await?;

    Ok(Json(MessageResponse {
        message: "Password updated. You can now sign in.".to_string(),
    }))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(key) = session_key(&jar, state.config.jwt_secret.as_deref()) {
        state.notification_hub.close(&key);
    }

    (clear_session_cookies(jar), Redirect::to(LOGIN_PATH))
}
