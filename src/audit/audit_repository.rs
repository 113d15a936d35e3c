use super::{audit_dto::UpdateAuditExpiryRequest, audit_models::AuditExpirySettings};
use crate::{api::ApiClient, error::Result};

const AUDIT_EXPIRY_PATH: &str = "/api/audit-expiry/";

#[derive(Clone)]
pub struct AuditRepository {
    api: ApiClient,
}

impl AuditRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn find(&self, token: &str) -> Result<AuditExpirySettings> {
        self.api.get(AUDIT_EXPIRY_PATH, Some(token)).await
    }

    /// Settings for badge colouring; defaults when the API can't provide them.
    pub async fn find_or_default(&self, token: &str) -> AuditExpirySettings {
        match self.find(token).await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Using default audit expiry settings: {}", e);
                AuditExpirySettings::default()
            }
        }
    }

    pub async fn update(
        &self,
        token: &str,
        payload: &UpdateAuditExpiryRequest,
    ) -> Result<AuditExpirySettings> {
        self.api.put(AUDIT_EXPIRY_PATH, Some(token), payload).await
    }
}
