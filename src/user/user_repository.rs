use super::user_models::{Role, User};
use crate::{api::ApiClient, error::Result};

#[derive(Clone)]
pub struct UserRepository {
    api: ApiClient,
}

impl UserRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn find_all(&self, token: &str) -> Result<Vec<User>> {
        self.api.get("/api/users/", Some(token)).await
    }

    pub async fn find_by_id(&self, token: &str, id: i64) -> Result<User> {
        self.api.get(&format!("/api/users/{}/", id), Some(token)).await
    }

    pub async fn find_roles(&self, token: &str) -> Result<Vec<Role>> {
        self.api.get("/access/roles/", Some(token)).await
    }
}
