use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::user_models::{Role, RoleRef, User};
use crate::audit::{AuditExpirySettings, ExpiryBadge};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    pub full_name: String,
    pub role_name: Option<String>,
    pub licence: ExpiryBadge,
}

impl UserView {
    pub fn new(user: User, roles: &[Role], settings: &AuditExpirySettings, today: NaiveDate) -> Self {
        let role_name = match &user.role {
            Some(RoleRef::Id(id)) => roles.iter().find(|r| r.id == *id).map(|r| r.name.clone()),
            Some(RoleRef::Name(name)) => Some(name.clone()),
            None => None,
        };

        Self {
            full_name: user.full_name(),
            role_name,
            licence: ExpiryBadge::new(
                "Licence",
                user.licence_expiry,
                today,
                settings.licence_warning_days,
            ),
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::ExpiryStatus;
    use serde_json::json;

    #[test]
    fn test_view_resolves_role_and_licence() {
        let user: User = serde_json::from_value(json!({
            "id": 4,
            "first_name": "Priya",
            "last_name": "Shah",
            "email": "priya@example.com",
            "role": 2,
            "licence_expiry": "2024-07-01"
        }))
        .unwrap();
        let roles = vec![
            Role { id: 1, name: "Admin".into() },
            Role { id: 2, name: "Driver".into() },
        ];
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let view = UserView::new(user, &roles, &AuditExpirySettings::default(), today);
        assert_eq!(view.full_name, "Priya Shah");
        assert_eq!(view.role_name.as_deref(), Some("Driver"));
        assert_eq!(view.licence.status, ExpiryStatus::DueSoon);
    }
}
