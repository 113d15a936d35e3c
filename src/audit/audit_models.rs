use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::display::{format_date, BadgeColor};

/// Warning windows, in days, before a document expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditExpirySettings {
    #[serde(default)]
    pub id: Option<i64>,
    pub mot_warning_days: i64,
    pub tax_warning_days: i64,
    pub insurance_warning_days: i64,
    pub licence_warning_days: i64,
}

impl Default for AuditExpirySettings {
    fn default() -> Self {
        Self {
            id: None,
            mot_warning_days: 30,
            tax_warning_days: 30,
            insurance_warning_days: 30,
            licence_warning_days: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Missing,
    Valid,
    DueSoon,
    Expired,
}

impl ExpiryStatus {
    /// Expired on the day itself; due soon within the warning window.
    pub fn classify(expiry: Option<NaiveDate>, today: NaiveDate, warning_days: i64) -> Self {
        match expiry {
            None => ExpiryStatus::Missing,
            Some(date) if date <= today => ExpiryStatus::Expired,
            Some(date) if (date - today).num_days() <= warning_days => ExpiryStatus::DueSoon,
            Some(_) => ExpiryStatus::Valid,
        }
    }

    pub fn color(self) -> BadgeColor {
        match self {
            ExpiryStatus::Missing => BadgeColor::Grey,
            ExpiryStatus::Valid => BadgeColor::Green,
            ExpiryStatus::DueSoon => BadgeColor::Amber,
            ExpiryStatus::Expired => BadgeColor::Red,
        }
    }

    pub fn needs_attention(self) -> bool {
        matches!(self, ExpiryStatus::DueSoon | ExpiryStatus::Expired)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExpiryBadge {
    pub label: String,
    pub status: ExpiryStatus,
    pub color: BadgeColor,
    /// dd/mm/yyyy
    pub date: Option<String>,
    pub days_remaining: Option<i64>,
}

impl ExpiryBadge {
    pub fn new(label: &str, expiry: Option<NaiveDate>, today: NaiveDate, warning_days: i64) -> Self {
        let status = ExpiryStatus::classify(expiry, today, warning_days);
        Self {
            label: label.to_string(),
            status,
            color: status.color(),
            date: expiry.map(format_date),
            days_remaining: expiry.map(|d| (d - today).num_days()),
        }
    }
}
