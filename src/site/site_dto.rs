use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SiteRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 5, max = 8, message = "Postcode must be 5 to 8 characters"))]
    pub postcode: String,
    pub phone: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_are_bounded() {
        let request = SiteRequest {
            name: "Leeds depot".into(),
            address: "1 Canal Wharf".into(),
            postcode: "LS11 5PS".into(),
            phone: None,
            latitude: Some(95.0),
            longitude: Some(-1.55),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("latitude"));
        assert!(!errors.field_errors().contains_key("longitude"));
    }
}
