use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::display::BadgeColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Maintenance,
    OffRoad,
    Sold,
    #[serde(other)]
    Unknown,
}

impl VehicleStatus {
    pub fn color(self) -> BadgeColor {
        match self {
            VehicleStatus::Active => BadgeColor::Green,
            VehicleStatus::Maintenance => BadgeColor::Amber,
            VehicleStatus::OffRoad => BadgeColor::Red,
            VehicleStatus::Sold | VehicleStatus::Unknown => BadgeColor::Grey,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Vehicle {
    pub id: i64,
    pub registration: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    pub status: VehicleStatus,
    #[serde(default)]
    pub site: Option<i64>,
    #[serde(default)]
    pub mileage: Option<i64>,
    #[serde(default)]
    pub mot_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub tax_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub insurance_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_status_is_grey() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": 7,
            "registration": "AB12 CDE",
            "status": "scrapped"
        }))
        .unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Unknown);
        assert_eq!(vehicle.status.color(), BadgeColor::Grey);
        assert_eq!(VehicleStatus::OffRoad.color(), BadgeColor::Red);
    }
}
