use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};

use crate::{
    auth::{
        cookies::{
            self, clear_session_cookies, cookie_header, session_cookie, store_access_token,
        },
        inspect_token, TokenInfo, TokenStatus,
    },
    error::AppError,
    state::AppState,
};

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The signed-in user, attached to every request under `/dashboard`.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub user_id: Option<String>,
    pub role: Option<String>,
    pub expires_at: DateTime<Utc>,
    /// False when the token's claims were read without signature verification.
    pub claims_verified: bool,
}

impl Session {
    fn new(access_token: String, info: &TokenInfo, jar: &CookieJar) -> Self {
        Self {
            user_id: jar
                .get(cookies::USER_ID)
                .map(|c| c.value().to_string())
                .or_else(|| info.claims.user_id()),
            role: jar
                .get(cookies::ROLE)
                .map(|c| c.value().to_string())
                .or_else(|| info.claims.role.clone()),
            expires_at: info.claims.expires_at(),
            claims_verified: info.verified,
            access_token,
        }
    }

    pub fn token(&self) -> &str {
        &self.access_token
    }

    /// Identifies the session's notification channel.
    pub fn key(&self) -> String {
        channel_key(self.user_id.clone(), &self.access_token)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AppError::Unauthorized("Not signed in".to_string()))
    }
}

/// Notification channel key: the user id when known, else the access token itself.
pub fn channel_key(user_id: Option<String>, access_token: &str) -> String {
    user_id.unwrap_or_else(|| access_token.to_string())
}

/// Channel key for the session held in `jar`, resolved the same way as [`Session::key`].
/// Expired tokens still name their user, so the channel can be closed on the way out.
pub fn session_key(jar: &CookieJar, secret: Option<&str>) -> Option<String> {
    let token = jar.get(cookies::ACCESS_TOKEN).map(|c| c.value().to_string());
    let user_id = jar
        .get(cookies::USER_ID)
        .map(|c| c.value().to_string())
        .or_else(|| {
            let token = token.as_deref()?;
            match inspect_token(token, secret, Utc::now().timestamp()) {
                TokenStatus::Valid(info) | TokenStatus::Expired(info) => info.claims.user_id(),
                TokenStatus::Invalid => None,
            }
        });

    match token {
        Some(token) => Some(channel_key(user_id, &token)),
        None => user_id,
    }
}

/// `/` goes to the dashboard when a token cookie exists, to the login page otherwise.
pub async fn root_redirect(jar: CookieJar) -> Redirect {
    if jar.get(cookies::ACCESS_TOKEN).is_some() {
        Redirect::to(DASHBOARD_PATH)
    } else {
        Redirect::to(LOGIN_PATH)
    }
}

/// Gates the dashboard: valid tokens pass untouched, expired ones get one refresh attempt.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = jar.get(cookies::ACCESS_TOKEN).map(|c| c.value().to_string()) else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    let secret = state.config.jwt_secret.as_deref();

    match inspect_token(&token, secret, Utc::now().timestamp()) {
        TokenStatus::Valid(info) => {
            let session = Session::new(token, &info, &jar);
            state.notification_hub.ensure(&session.key(), session.token());
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        TokenStatus::Expired(_) => refresh_and_continue(state, jar, req, next).await,
        TokenStatus::Invalid => {
            tracing::warn!("Rejecting request with an unreadable access token");
            end_session(&state, jar)
        }
    }
}

async fn refresh_and_continue(
    state: AppState,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(refresh_token) = jar.get(cookies::REFRESH_TOKEN).map(|c| c.value().to_string())
    else {
        return end_session(&state, jar);
    };

    let refreshed = match state.auth_repository.refresh(&refresh_token).await {
        Ok(refreshed) => refreshed,
        Err(e) => {
            tracing::info!("Token refresh failed, ending session: {}", e);
            return end_session(&state, jar);
        }
    };

    let secret = state.config.jwt_secret.as_deref();
    let info = match inspect_token(&refreshed.access, secret, Utc::now().timestamp()) {
        TokenStatus::Valid(info) => info,
        _ => {
            tracing::warn!("Refresh returned an unusable access token");
            return end_session(&state, jar);
        }
    };

    let secure = state.config.cookie_secure;
    let mut jar = store_access_token(
        jar,
        refreshed.access.clone(),
        info.claims.expires_at(),
        secure,
    );
    if let Some(rotated) = refreshed.refresh {
        jar = jar.add(session_cookie(cookies::REFRESH_TOKEN, rotated, secure));
    }

    if let Ok(value) = HeaderValue::from_str(&cookie_header(&jar)) {
        req.headers_mut().insert(header::COOKIE, value);
    }

    let session = Session::new(refreshed.access, &info, &jar);
    tracing::debug!("Refreshed access token for session {}", session.key());
    state.notification_hub.ensure(&session.key(), session.token());
    req.extensions_mut().insert(session);

    (jar, next.run(req).await).into_response()
}

fn end_session(state: &AppState, jar: CookieJar) -> Response {
    if let Some(key) = session_key(&jar, state.config.jwt_secret.as_deref()) {
        state.notification_hub.close(&key);
    }
    (clear_session_cookies(jar), Redirect::to(LOGIN_PATH)).into_response()
}
