use super::{vehicle_dto::VehicleRequest, vehicle_models::Vehicle};
use crate::{api::ApiClient, error::Result};

#[derive(Clone)]
pub struct VehicleRepository {
    api: ApiClient,
}

impl VehicleRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn find_all(&self, token: &str) -> Result<Vec<Vehicle>> {
        self.api.get("/api/vehicles/", Some(token)).await
    }

    pub async fn find_by_id(&self, token: &str, id: i64) -> Result<Vehicle> {
        self.api
            .get(&format!("/api/vehicles/{}/", id), Some(token))
            .await
    }

    pub async fn create(&self, token: &str, payload: &VehicleRequest) -> Result<Vehicle> {
        self.api.post("/api/vehicles/", Some(token), payload).await
    }

    pub async fn update(&self, token: &str, id: i64, payload: &VehicleRequest) -> Result<Vehicle> {
        self.api
            .put(&format!("/api/vehicles/{}/", id), Some(token), payload)
            .await
    }

    pub async fn delete(&self, token: &str, id: i64) -> Result<()> {
        self.api
            .delete(&format!("/api/vehicles/{}/", id), Some(token))
            .await
    }
}
