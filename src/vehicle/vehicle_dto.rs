use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::vehicle_models::{Vehicle, VehicleStatus};
use crate::{
    audit::{AuditExpirySettings, ExpiryBadge},
    display::BadgeColor,
};

/// Body for creating or replacing a vehicle.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct VehicleRequest {
    #[validate(length(min = 2, max = 10, message = "Registration must be 2 to 10 characters"))]
    pub registration: String,
    #[validate(length(min = 1, message = "Make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    pub vehicle_type: Option<String>,
    pub status: VehicleStatus,
    pub site: Option<i64>,
    #[validate(range(min = 0, message = "Mileage cannot be negative"))]
    pub mileage: Option<i64>,
    pub mot_expiry: Option<NaiveDate>,
    pub tax_expiry: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
    pub image_url: Option<String>,
}

/// A vehicle with its display badges.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VehicleView {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub status_color: BadgeColor,
    pub badges: Vec<ExpiryBadge>,
}

impl VehicleView {
    pub fn new(vehicle: Vehicle, settings: &AuditExpirySettings, today: NaiveDate) -> Self {
        let badges = vec![
            ExpiryBadge::new("MOT", vehicle.mot_expiry, today, settings.mot_warning_days),
            ExpiryBadge::new("Tax", vehicle.tax_expiry, today, settings.tax_warning_days),
            ExpiryBadge::new(
                "Insurance",
                vehicle.insurance_expiry,
                today,
                settings.insurance_warning_days,
            ),
        ];

        Self {
            status_color: vehicle.status.color(),
            vehicle,
            badges,
        }
    }

    pub fn needs_attention(&self) -> bool {
        self.badges.iter().any(|b| b.status.needs_attention())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::ExpiryStatus;
    use serde_json::json;

    #[test]
    fn test_view_flags_expiring_documents() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": 1,
            "registration": "AB12 CDE",
            "make": "Ford",
            "model": "Transit",
            "status": "active",
            "mot_expiry": "2024-06-10",
            "tax_expiry": "2025-01-01"
        }))
        .unwrap();

        let view = VehicleView::new(vehicle, &AuditExpirySettings::default(), today);
        let statuses: Vec<ExpiryStatus> = view.badges.iter().map(|b| b.status).collect();
        assert_eq!(
            statuses,
            vec![ExpiryStatus::DueSoon, ExpiryStatus::Valid, ExpiryStatus::Missing]
        );
        assert!(view.needs_attention());

        let body = serde_json::to_value(&view).unwrap();
        assert_eq!(body["registration"], json!("AB12 CDE"));
        assert_eq!(body["status_color"], json!("green"));
    }

    #[test]
    fn test_request_validation() {
        let request: VehicleRequest = serde_json::from_value(json!({
            "registration": "A",
            "make": "",
            "model": "Transit",
            "status": "active",
            "mileage": -5
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("registration"));
        assert!(fields.contains_key("make"));
        assert!(fields.contains_key("mileage"));
    }
}
