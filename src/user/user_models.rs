use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Drivers and office staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<RoleRef>,
    #[serde(default)]
    pub site: Option<i64>,
    #[serde(default)]
    pub licence_number: Option<String>,
    #[serde(default)]
    pub licence_expiry: Option<NaiveDate>,
}

impl User {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// The API sends a user's role either as its id or as its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RoleRef {
    Id(i64),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_by_id_or_name() {
        let by_id: User = serde_json::from_value(json!({
            "id": 1, "first_name": "Sam", "last_name": "Hill", "email": "sam@example.com", "role": 3
        }))
        .unwrap();
        let by_name: User = serde_json::from_value(json!({
            "id": 2, "email": "ops@example.com", "role": "manager"
        }))
        .unwrap();

        assert_eq!(by_id.role, Some(RoleRef::Id(3)));
        assert_eq!(by_id.full_name(), "Sam Hill");
        assert_eq!(by_name.role, Some(RoleRef::Name("manager".into())));
        assert_eq!(by_name.full_name(), "ops@example.com");
    }
}
