use async_trait::async_trait;

use super::{
    rota_dto::UpdateShiftCellRequest,
    rota_editor::RotaGateway,
    rota_models::{ChildRota, ChildRotaSummary, Shift, ShiftCell},
};
use crate::{api::ApiClient, error::Result};

#[derive(Clone)]
pub struct RotaRepository {
    api: ApiClient,
}

impl RotaRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn find_all(&self, token: &str) -> Result<Vec<ChildRotaSummary>> {
        self.api.get("/api/rota/child-rota/", Some(token)).await
    }

    pub async fn find_by_id(&self, token: &str, rota_id: i64) -> Result<ChildRota> {
        self.api
            .get(&format!("/api/rota/child-rota/{}/", rota_id), Some(token))
            .await
    }

    pub async fn find_shifts(&self, token: &str) -> Result<Vec<Shift>> {
        self.api.get("/api/rota/shifts/", Some(token)).await
    }
}

#[async_trait]
impl RotaGateway for RotaRepository {
    async fn update_cell(
        &self,
        token: &str,
        rota_id: i64,
        cell_id: i64,
        update: &UpdateShiftCellRequest,
    ) -> Result<ShiftCell> {
        self.api
            .put(
                &format!("/api/rota/child-rota/{}/cells/{}/", rota_id, cell_id),
                Some(token),
                update,
            )
            .await
    }
}
