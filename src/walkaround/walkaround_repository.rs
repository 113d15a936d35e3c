use super::{walkaround_dto::WalkaroundFilters, walkaround_models::Walkaround};
use crate::{api::ApiClient, error::Result};

#[derive(Clone)]
pub struct WalkaroundRepository {
    api: ApiClient,
}

impl WalkaroundRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn find_all(&self, token: &str, filters: &WalkaroundFilters) -> Result<Vec<Walkaround>> {
        self.api
            .get(&format!("/api/walk-around/{}", filters.query_string()), Some(token))
            .await
    }

    pub async fn find_by_id(&self, token: &str, id: i64) -> Result<Walkaround> {
        self.api
            .get(&format!("/api/walk-around/{}/", id), Some(token))
            .await
    }
}
