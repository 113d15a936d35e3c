use crate::{api::ApiClient, error::Result};

use super::auth_dto::{
    ForgotPasswordRequest, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest,
    ResetPasswordRequest, TokenPair,
};

/// Authentication endpoints of the fleet API. None of these carry a bearer token.
#[derive(Clone)]
pub struct AuthRepository {
    api: ApiClient,
}

impl AuthRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, payload: &LoginRequest) -> Result<TokenPair> {
        self.api.post("/api/auth/login/", None, payload).await
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<()> {
        self.api.post_unit("/api/auth/register/", None, payload).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse> {
        self.api
            .post(
                "/api/auth/refresh/",
                None,
                &RefreshRequest {
                    refresh: refresh_token,
                },
            )
            .await
    }

    pub async fn forgot_password(&self, payload: &ForgotPasswordRequest) -> Result<()> {
        self.api
            .post_unit("/api/password/forgot_password/", None, payload)
            .await
    }

    pub async fn reset_password(&self, payload: &ResetPasswordRequest) -> Result<()> {
        self.api
            .post_unit("/api/password/reset_password/", None, payload)
            .await
    }
}
