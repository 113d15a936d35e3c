use super::{site_dto::SiteRequest, site_models::Site};
use crate::{api::ApiClient, error::Result};

#[derive(Clone)]
pub struct SiteRepository {
    api: ApiClient,
}

impl SiteRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn find_all(&self, token: &str) -> Result<Vec<Site>> {
        self.api.get("/api/sites/", Some(token)).await
    }

    pub async fn find_by_id(&self, token: &str, id: i64) -> Result<Site> {
        self.api.get(&format!("/api/sites/{}/", id), Some(token)).await
    }

    pub async fn create(&self, token: &str, payload: &SiteRequest) -> Result<Site> {
        self.api.post("/api/sites/", Some(token), payload).await
    }

    pub async fn update(&self, token: &str, id: i64, payload: &SiteRequest) -> Result<Site> {
        self.api
            .put(&format!("/api/sites/{}/", id), Some(token), payload)
            .await
    }

    pub async fn delete(&self, token: &str, id: i64) -> Result<()> {
        self.api
            .delete(&format!("/api/sites/{}/", id), Some(token))
            .await
    }
}
