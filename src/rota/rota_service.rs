use chrono::{NaiveDate, Weekday};

use super::{
    grid::{build_grid, RotaGrid},
    rota_dto::ShiftEditForm,
    rota_editor::ShiftEditor,
    rota_models::{ChildRota, ChildRotaSummary, Shift},
    rota_repository::RotaRepository,
    week::{days_between, month_days, parse_month},
};
use crate::error::{AppError, Result};

/// Result of saving a cell from the edit dialog.
#[derive(Debug)]
pub enum SaveOutcome {
    /// The rota was re-fetched after the update.
    Saved(RotaGrid),
    Rejected { error: String, form: ShiftEditForm },
}

#[derive(Clone)]
pub struct RotaService {
    repo: RotaRepository,
    first_day: Weekday,
    currency: String,
}

impl RotaService {
    pub fn new(repo: RotaRepository, first_day: Weekday, currency: String) -> Self {
        Self {
            repo,
            first_day,
            currency,
        }
    }

    pub async fn list_rotas(&self, token: &str) -> Result<Vec<ChildRotaSummary>> {
        self.repo.find_all(token).await
    }

    pub async fn list_shifts(&self, token: &str) -> Result<Vec<Shift>> {
        self.repo.find_shifts(token).await
    }

    pub async fn grid(&self, token: &str, rota_id: i64, month: Option<&str>) -> Result<RotaGrid> {
        let rota = self.repo.find_by_id(token, rota_id).await?;
        let days = rota_days(&rota, month)?;
        Ok(build_grid(&rota, &days, self.first_day, &self.currency))
    }

    /// Opens the edit dialog for one cell of the rota.
    pub async fn editor(&self, token: &str, rota_id: i64, cell_id: i64) -> Result<ShiftEditor> {
        let rota = self.repo.find_by_id(token, rota_id).await?;
        let cell = rota
            .cells
            .iter()
            .find(|c| c.id == cell_id)
            .ok_or_else(|| AppError::NotFound(format!("Cell {} is not part of rota {}", cell_id, rota_id)))?;
        Ok(ShiftEditor::open(rota_id, cell))
    }

    /// Submits the dialog once. On success the parent rota is fetched again.
    pub async fn save_cell(
        &self,
        token: &str,
        rota_id: i64,
        cell_id: i64,
        form: ShiftEditForm,
        month: Option<&str>,
    ) -> Result<SaveOutcome> {
        let mut editor = ShiftEditor::with_form(rota_id, cell_id, form);

        if editor.submit(&self.repo, token).await.is_none() {
            return Ok(SaveOutcome::Rejected {
                error: editor.error().unwrap_or("Update failed").to_string(),
                form: editor.form().clone(),
            });
        }

        let grid = self.grid(token, rota_id, month).await?;
        Ok(SaveOutcome::Saved(grid))
    }
}

/// Days shown for a rota: the requested `YYYY-MM` month, else the rota's own range.
pub fn rota_days(rota: &ChildRota, month: Option<&str>) -> Result<Vec<NaiveDate>> {
    match month {
        Some(text) => {
            let (year, month) = parse_month(text)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid month '{}', expected YYYY-MM", text)))?;
            month_days(year, month)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid month '{}'", text)))
        }
        None => Ok(days_between(rota.start_date, rota.end_date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::ApiClient, rota::grid::tests::sample_rota, test_support::spawn_upstream};
    use axum::{
        extract::State,
        http::StatusCode,
        routing::{get, put},
        Json, Router,
    };
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[derive(Clone, Default)]
    struct Counters {
        puts: Arc<AtomicUsize>,
        gets: Arc<AtomicUsize>,
    }

    async fn service(reject: bool) -> (RotaService, Counters) {
        let counters = Counters::default();
        let app = Router::new()
            .route(
                "/api/rota/child-rota/5/",
                get(|State(c): State<Counters>| async move {
                    c.gets.fetch_add(1, Ordering::SeqCst);
                    Json(serde_json::to_value(sample_rota()).unwrap())
                }),
            )
            .route(
                "/api/rota/child-rota/5/cells/1/",
                put(move |State(c): State<Counters>, Json(body): Json<Value>| async move {
                    c.puts.fetch_add(1, Ordering::SeqCst);
                    if reject {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(json!({ "detail": "Shift not allowed for this contract" })),
                        );
                    }
                    let mut cell = serde_json::to_value(&sample_rota().cells[0]).unwrap();
                    cell["salary"] = body["salary"].clone();
                    cell["hours"] = body["hours"].clone();
                    (StatusCode::OK, Json(cell))
                }),
            )
            .with_state(counters.clone());

        let base = spawn_upstream(app).await;
        let repo = RotaRepository::new(ApiClient::new(&base).unwrap());
        (RotaService::new(repo, Weekday::Mon, "£".into()), counters)
    }

    #[test]
    fn test_rota_days_uses_month_or_range() {
        let rota = sample_rota();
        assert_eq!(rota_days(&rota, None).unwrap().len(), 31);
        assert_eq!(rota_days(&rota, Some("2024-02")).unwrap().len(), 29);
        assert!(matches!(rota_days(&rota, Some("2024-13")), Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_save_refreshes_parent_rota() {
        let (service, counters) = service(false).await;
        let form = ShiftEditForm {
            shift_id: Some(1),
            salary: Some(Decimal::from(13)),
            hours: Some(Decimal::from(8)),
        };

        let outcome = service.save_cell("token", 5, 1, form, None).await.unwrap();
        assert!(matches!(outcome, SaveOutcome::Saved(ref grid) if grid.rota_id == 5));
        assert_eq!(counters.puts.load(Ordering::SeqCst), 1);
        assert_eq!(counters.gets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_form() {
        let (service, counters) = service(true).await;
        let form = ShiftEditForm {
            shift_id: Some(2),
            salary: None,
            hours: Some(Decimal::from(6)),
        };

        match service.save_cell("token", 5, 1, form.clone(), None).await.unwrap() {
            SaveOutcome::Rejected { error, form: kept } => {
                assert_eq!(error, "Shift not allowed for this contract");
                assert_eq!(kept, form);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(counters.puts.load(Ordering::SeqCst), 1);
        assert_eq!(counters.gets.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_editor_for_unknown_cell() {
        let (service, _) = service(false).await;
        assert!(matches!(service.editor("token", 5, 99).await, Err(AppError::NotFound(_))));

        let editor = service.editor("token", 5, 2).await.unwrap();
        assert_eq!(editor.form().shift_id, Some(2));
    }
}
