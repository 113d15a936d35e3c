use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::display::BadgeColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WalkaroundStatus {
    Pass,
    Fail,
    Defect,
    #[serde(other)]
    Unknown,
}

impl WalkaroundStatus {
    pub fn color(self) -> BadgeColor {
        match self {
            WalkaroundStatus::Pass => BadgeColor::Green,
            WalkaroundStatus::Fail => BadgeColor::Red,
            WalkaroundStatus::Defect => BadgeColor::Amber,
            WalkaroundStatus::Unknown => BadgeColor::Grey,
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(self, WalkaroundStatus::Fail | WalkaroundStatus::Defect)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Defect {
    pub item: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Option<String>,
}

/// A driver's pre-trip vehicle inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Walkaround {
    pub id: i64,
    pub vehicle: i64,
    #[serde(default)]
    pub vehicle_registration: Option<String>,
    #[serde(default)]
    pub driver: Option<i64>,
    #[serde(default)]
    pub driver_name: Option<String>,
    pub inspected_at: DateTime<Utc>,
    #[serde(default)]
    pub mileage: Option<i64>,
    pub status: WalkaroundStatus,
    #[serde(default)]
    pub defects: Vec<Defect>,
    #[serde(default)]
    pub notes: Option<String>,
}
