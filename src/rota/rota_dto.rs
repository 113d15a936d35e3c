use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Values in the shift edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShiftEditForm {
    pub shift_id: Option<i64>,
    #[schema(value_type = Option<String>)]
    pub salary: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub hours: Option<Decimal>,
}

impl ShiftEditForm {
    pub fn check(&self) -> Result<(), String> {
        if let Some(salary) = self.salary {
            if salary.is_sign_negative() {
                return Err("Salary cannot be negative".to_string());
            }
        }
        if let Some(hours) = self.hours {
            if hours.is_sign_negative() || hours > Decimal::from(24) {
                return Err("Hours must be between 0 and 24".to_string());
            }
        }
        Ok(())
    }

    pub fn to_request(&self) -> UpdateShiftCellRequest {
        UpdateShiftCellRequest {
            shift: self.shift_id,
            salary: self.salary,
            hours: self.hours,
        }
    }
}

/// Body of the single PUT that updates a rota cell. All three fields are always sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateShiftCellRequest {
    pub shift: Option<i64>,
    pub salary: Option<Decimal>,
    pub hours: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct RotaQuery {
    /// `YYYY-MM`; defaults to the rota's own date range.
    pub month: Option<String>,
}

/// Returned when a cell edit is refused; the dialog stays open with these values.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShiftEditRejected {
    pub error: String,
    pub form: ShiftEditForm,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_request_always_carries_three_fields() {
        let form = ShiftEditForm {
            shift_id: None,
            salary: Some(Decimal::from_str("12.00").unwrap()),
            hours: None,
        };
        let body = serde_json::to_value(form.to_request()).unwrap();
        assert_eq!(body, json!({ "shift": null, "salary": "12.00", "hours": null }));
    }

    #[test]
    fn test_check_bounds() {
        let mut form = ShiftEditForm::default();
        assert!(form.check().is_ok());

        form.hours = Some(Decimal::from(25));
        assert!(form.check().is_err());

        form.hours = Some(Decimal::from(8));
        form.salary = Some(Decimal::from(-1));
        assert_eq!(form.check().unwrap_err(), "Salary cannot be negative");
    }
}
