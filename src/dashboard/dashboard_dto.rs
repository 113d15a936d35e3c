use serde::Serialize;
use utoipa::ToSchema;

use crate::websocket::ConnectionState;

/// Counts shown on the dashboard landing page.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub vehicles: usize,
    pub active_vehicles: usize,
    /// Vehicles with a document due soon or expired.
    pub vehicles_needing_attention: usize,
    pub sites: usize,
    pub walkarounds: usize,
    pub failed_walkarounds: usize,
    pub unread_notifications: usize,
    pub notification_connection: ConnectionState,
}
