use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAuditExpiryRequest {
    #[validate(range(min = 0, max = 365, message = "Must be between 0 and 365 days"))]
    pub mot_warning_days: i64,
    #[validate(range(min = 0, max = 365, message = "Must be between 0 and 365 days"))]
    pub tax_warning_days: i64,
    #[validate(range(min = 0, max = 365, message = "Must be between 0 and 365 days"))]
    pub insurance_warning_days: i64,
    #[validate(range(min = 0, max = 365, message = "Must be between 0 and 365 days"))]
    pub licence_warning_days: i64,
}
