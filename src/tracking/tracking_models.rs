use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VehiclePosition {
    pub vehicle_id: i64,
    pub registration: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Degrees clockwise from north.
    pub heading: f64,
    pub speed_kph: f64,
    pub updated_at: DateTime<Utc>,
}
