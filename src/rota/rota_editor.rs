use async_trait::async_trait;

use super::{
    rota_dto::{ShiftEditForm, UpdateShiftCellRequest},
    rota_models::ShiftCell,
};
use crate::error::Result;

/// Where cell edits are written.
#[async_trait]
pub trait RotaGateway: Send + Sync {
    async fn update_cell(
        &self,
        token: &str,
        rota_id: i64,
        cell_id: i64,
        update: &UpdateShiftCellRequest,
    ) -> Result<ShiftCell>;
}

/// The edit dialog for one rota cell.
#[derive(Debug, Clone)]
pub struct ShiftEditor {
    rota_id: i64,
    cell_id: i64,
    form: ShiftEditForm,
    error: Option<String>,
    open: bool,
}

impl ShiftEditor {
    /// Opens the dialog pre-filled with the cell's current shift, salary and hours.
    pub fn open(rota_id: i64, cell: &ShiftCell) -> Self {
        Self {
            rota_id,
            cell_id: cell.id,
            form: ShiftEditForm {
                shift_id: cell.shift.as_ref().map(|s| s.id),
                salary: cell.effective_rate(),
                hours: cell.effective_hours(),
            },
            error: None,
            open: true,
        }
    }

    /// Re-opens the dialog with values the browser already submitted.
    pub fn with_form(rota_id: i64, cell_id: i64, form: ShiftEditForm) -> Self {
        Self {
            rota_id,
            cell_id,
            form,
            error: None,
            open: true,
        }
    }

    pub fn cell_id(&self) -> i64 {
        self.cell_id
    }

    pub fn form(&self) -> &ShiftEditForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ShiftEditForm {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Sends one combined update. Closes on success; on failure keeps the error and stays open.
    pub async fn submit<G>(&mut self, gateway: &G, token: &str) -> Option<ShiftCell>
    where
        G: RotaGateway + ?Sized,
    {
        if !self.open {
            return None;
        }

        if let Err(message) = self.form.check() {
            self.error = Some(message);
            return None;
        }

        let request = self.form.to_request();
        match gateway
            .update_cell(token, self.rota_id, self.cell_id, &request)
            .await
        {
            Ok(cell) => {
                tracing::info!("Updated rota {} cell {}", self.rota_id, self.cell_id);
                self.error = None;
                self.open = false;
                Some(cell)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to update rota {} cell {}: {}",
                    self.rota_id,
                    self.cell_id,
                    e
                );
                self.error = Some(e.to_string());
                None
            }
        }
    }
}
