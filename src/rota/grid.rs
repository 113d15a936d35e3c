use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use super::{
    rota_models::{ChildRota, RotaUser, ShiftCell},
    week::{iso_week_number, partition_weeks},
};
use crate::display::{format_currency, format_date, format_hours};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RotaGrid {
    pub rota_id: i64,
    pub rota_name: String,
    /// Column order.
    pub users: Vec<RotaUser>,
    pub weeks: Vec<WeekBlock>,
}

impl RotaGrid {
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.iter().flat_map(|w| w.rows.iter().map(|r| r.date))
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekBlock {
    pub label: String,
    pub iso_week: u32,
    pub starts_on: NaiveDate,
    pub rows: Vec<DayRow>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayRow {
    pub date: NaiveDate,
    pub label: String,
    /// One entry per user, in column order.
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridCell {
    Assigned { card: ShiftCard },
    /// `cell_id` is set when the API already has a record for this user and day.
    Empty {
        cell_id: Option<i64>,
        user_id: i64,
        date: NaiveDate,
    },
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShiftCard {
    pub cell_id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub shift_id: i64,
    pub shift_name: String,
    pub color: String,
    pub rate: String,
    pub hours: String,
    #[schema(value_type = Option<String>)]
    pub rate_value: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub hours_value: Option<Decimal>,
}

impl ShiftCard {
    fn from_cell(cell: &ShiftCell, currency: &str) -> Option<Self> {
        let shift = cell.shift.as_ref()?;
        let rate_value = cell.effective_rate();
        let hours_value = cell.effective_hours();

        Some(Self {
            cell_id: cell.id,
            user_id: cell.user,
            date: cell.date,
            shift_id: shift.id,
            shift_name: shift.name.clone(),
            color: shift.color.clone(),
            rate: rate_value
                .map(|r| format!("{}/hr", format_currency(r, currency)))
                .unwrap_or_default(),
            hours: hours_value.map(format_hours).unwrap_or_default(),
            rate_value,
            hours_value,
        })
    }
}

/// Lays the rota out as day rows grouped into calendar weeks, with one column per user.
pub fn build_grid(
    rota: &ChildRota,
    days: &[NaiveDate],
    first_day: Weekday,
    currency: &str,
) -> RotaGrid {
    let by_slot: HashMap<(i64, NaiveDate), &ShiftCell> =
        rota.cells.iter().map(|c| ((c.user, c.date), c)).collect();

    let weeks = partition_weeks(days, first_day)
        .into_iter()
        .map(|bucket| {
            let iso_week = iso_week_number(bucket.starts_on, first_day);
            let label = match (bucket.days.first(), bucket.days.last()) {
                (Some(first), Some(last)) => format!(
                    "Week {} ({} - {})",
                    iso_week,
                    format_date(*first),
                    format_date(*last)
                ),
                _ => format!("Week {}", iso_week),
            };

            let rows = bucket
                .days
                .iter()
                .map(|&date| DayRow {
                    date,
                    label: date.format("%a %d/%m").to_string(),
                    cells: rota
                        .users
                        .iter()
                        .map(|user| grid_cell(by_slot.get(&(user.id, date)).copied(), user.id, date, currency))
                        .collect(),
                })
                .collect();

            WeekBlock {
                label,
                iso_week,
                starts_on: bucket.starts_on,
                rows,
            }
        })
        .collect();

    RotaGrid {
        rota_id: rota.id,
        rota_name: rota.name.clone(),
        users: rota.users.clone(),
        weeks,
    }
}

fn grid_cell(cell: Option<&ShiftCell>, user_id: i64, date: NaiveDate, currency: &str) -> GridCell {
    match cell {
        Some(cell) => match ShiftCard::from_cell(cell, currency) {
            Some(card) => GridCell::Assigned { card },
            None => GridCell::Empty {
                cell_id: Some(cell.id),
                user_id,
                date,
            },
        },
        None => GridCell::Empty {
            cell_id: None,
            user_id,
            date,
        },
    }
}
