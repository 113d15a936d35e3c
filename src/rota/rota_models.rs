use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Shift {
    pub id: i64,
    pub name: String,
    #[schema(value_type = String, example = "08:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "16:30:00")]
    pub end_time: NaiveTime,
    #[schema(value_type = String, example = "12.50")]
    pub hourly_rate: Decimal,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub parent_contract: Option<i64>,
}

fn default_color() -> String {
    "#9ca3af".to_string()
}

impl Shift {
    /// Length of the shift in hours. An end at or before the start runs past midnight.
    pub fn total_hours(&self) -> Decimal {
        let mut minutes = (self.end_time - self.start_time).num_minutes();
        if minutes <= 0 {
            minutes += 24 * 60;
        }
        (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RotaUser {
    pub id: i64,
    #[serde(alias = "full_name")]
    pub name: String,
}

/// One user's assignment for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShiftCell {
    pub id: i64,
    pub user: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub shift: Option<Shift>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub salary: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub hours: Option<Decimal>,
}

impl ShiftCell {
    /// Hourly rate shown on the card: the cell's salary override, else the shift's rate.
    pub fn effective_rate(&self) -> Option<Decimal> {
        self.salary
            .or_else(|| self.shift.as_ref().map(|s| s.hourly_rate))
    }

    pub fn effective_hours(&self) -> Option<Decimal> {
        self.hours
            .or_else(|| self.shift.as_ref().map(Shift::total_hours))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChildRota {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_rota: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub users: Vec<RotaUser>,
    #[serde(default)]
    pub cells: Vec<ShiftCell>,
}

/// List entry for the rota picker.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChildRotaSummary {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn shift(start: &str, end: &str) -> Shift {
        Shift {
            id: 1,
            name: "Day".into(),
            start_time: NaiveTime::from_str(start).unwrap(),
            end_time: NaiveTime::from_str(end).unwrap(),
            hourly_rate: Decimal::from_str("12.50").unwrap(),
            color: "#22c55e".into(),
            parent_contract: None,
        }
    }

    #[test]
    fn test_total_hours() {
        assert_eq!(shift("08:00:00", "16:30:00").total_hours(), Decimal::from_str("8.5").unwrap());
        assert_eq!(shift("22:00:00", "06:00:00").total_hours(), Decimal::from(8));
    }

    #[test]
    fn test_cell_overrides_win() {
        let mut cell = ShiftCell {
            id: 10,
            user: 3,
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            shift: Some(shift("08:00:00", "16:00:00")),
            salary: None,
            hours: None,
        };
        assert_eq!(cell.effective_rate(), Some(Decimal::from_str("12.50").unwrap()));
        assert_eq!(cell.effective_hours(), Some(Decimal::from(8)));

        cell.salary = Some(Decimal::from(15));
        cell.hours = Some(Decimal::from(6));
        assert_eq!(cell.effective_rate(), Some(Decimal::from(15)));
        assert_eq!(cell.effective_hours(), Some(Decimal::from(6)));
    }

    #[test]
    fn test_decimal_fields_accept_strings() {
        let cell: ShiftCell = serde_json::from_str(
            r#"{"id":1,"user":2,"date":"2024-05-06","shift":null,"salary":"11.75","hours":"7.5"}"#,
        )
        .unwrap();
        assert_eq!(cell.salary, Some(Decimal::from_str("11.75").unwrap()));
        assert_eq!(cell.hours, Some(Decimal::from_str("7.5").unwrap()));
    }
}
