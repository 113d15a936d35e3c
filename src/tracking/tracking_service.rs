use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::info;

use super::tracking_board::TrackingBoard;
use crate::{
    state::AppState,
    vehicle::vehicle_models::{Vehicle, VehicleStatus},
};

pub const SIMULATION_INTERVAL: Duration = Duration::from_secs(5);

/// Moves the tracked vehicles every five seconds.
pub async fn start_tracking_simulation(board: TrackingBoard) -> anyhow::Result<()> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("*/5 * * * * *", move |_uuid, _l| {
        let board = board.clone();

        Box::pin(async move {
            simulate_tick(&board);
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Tracking simulation started");
    Ok(())
}

fn simulate_tick(board: &TrackingBoard) {
    if board.is_empty() {
        return;
    }
    board.step(&mut rand::thread_rng(), SIMULATION_INTERVAL);
    tracing::trace!("Moved {} tracked vehicles", board.len());
}

/// Keeps the board in step with a vehicle that was just created or edited.
/// An empty board is left alone; the first tracking request seeds it.
pub async fn sync_vehicle(state: &AppState, token: &str, vehicle: &Vehicle) {
    if vehicle.status == VehicleStatus::Sold {
        state.tracking.remove(vehicle.id);
        return;
    }
    if state.tracking.is_empty() {
        return;
    }

    let sites = match vehicle.site {
        Some(_) => state.site_repository.find_all(token).await.unwrap_or_else(|e| {
            tracing::warn!("Placing vehicle {} without site coordinates: {}", vehicle.id, e);
            Vec::new()
        }),
        None => Vec::new(),
    };

    let added = state
        .tracking
        .seed(std::slice::from_ref(vehicle), &sites, &mut rand::thread_rng());
    if added > 0 {
        tracing::debug!("Tracking vehicle {}", vehicle.registration);
    }
}
