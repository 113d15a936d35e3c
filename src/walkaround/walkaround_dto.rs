use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::walkaround_models::Walkaround;
use crate::display::{format_date, BadgeColor};

#[derive(Debug, Default, Deserialize)]
pub struct WalkaroundFilters {
    pub vehicle: Option<i64>,
    pub status: Option<String>,
}

impl WalkaroundFilters {
    /// Query string forwarded to the API, including the leading `?` when non-empty.
    pub fn query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(vehicle) = self.vehicle {
            params.push(format!("vehicle={}", vehicle));
        }
        if let Some(status) = self.status.as_deref().filter(|s| s.chars().all(|c| c.is_ascii_alphabetic() || c == '_')) {
            params.push(format!("status={}", status));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WalkaroundView {
    #[serde(flatten)]
    pub walkaround: Walkaround,
    pub status_color: BadgeColor,
    pub defect_count: usize,
    /// dd/mm/yyyy
    pub inspected_on: String,
}

impl From<Walkaround> for WalkaroundView {
    fn from(walkaround: Walkaround) -> Self {
        Self {
            status_color: walkaround.status.color(),
            defect_count: walkaround.defects.len(),
            inspected_on: format_date(walkaround.inspected_at.date_naive()),
            walkaround,
        }
    }
}
