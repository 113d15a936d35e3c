use chrono::Utc;
use dashmap::DashMap;
use rand::Rng;
use std::{sync::Arc, time::Duration};

use super::tracking_models::VehiclePosition;
use crate::{
    site::Site,
    vehicle::{Vehicle, VehicleStatus},
};

/// Used when a vehicle's site has no coordinates.
pub const DEFAULT_ORIGIN: (f64, f64) = (51.5072, -0.1276);
const METRES_PER_DEGREE: f64 = 111_320.0;
const MAX_SPEED_KPH: f64 = 90.0;

/// Live positions shown on the tracking page.
#[derive(Clone, Default)]
pub struct TrackingBoard {
    positions: Arc<DashMap<i64, VehiclePosition>>,
}

impl TrackingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Places vehicles that aren't on the board yet near their site. Sold vehicles are skipped.
    pub fn seed<R: Rng>(&self, vehicles: &[Vehicle], sites: &[Site], rng: &mut R) -> usize {
        let mut added = 0;

        for vehicle in vehicles {
            if vehicle.status == VehicleStatus::Sold || self.positions.contains_key(&vehicle.id) {
                continue;
            }

            let (lat, lon) = vehicle
                .site
                .and_then(|id| sites.iter().find(|s| s.id == id))
                .and_then(Site::coordinates)
                .unwrap_or(DEFAULT_ORIGIN);

            self.positions.insert(
                vehicle.id,
                VehiclePosition {
                    vehicle_id: vehicle.id,
                    registration: vehicle.registration.clone(),
                    latitude: lat + rng.gen_range(-0.02..0.02),
                    longitude: lon + rng.gen_range(-0.02..0.02),
                    heading: rng.gen_range(0.0..360.0),
                    speed_kph: 0.0,
                    updated_at: Utc::now(),
                },
            );
            added += 1;
        }

        added
    }

    pub fn remove(&self, vehicle_id: i64) {
        self.positions.remove(&vehicle_id);
    }

    /// Sorted by registration.
    pub fn snapshot(&self) -> Vec<VehiclePosition> {
        let mut positions: Vec<VehiclePosition> =
            self.positions.iter().map(|p| p.value().clone()).collect();
        positions.sort_by(|a, b| a.registration.cmp(&b.registration));
        positions
    }

    /// Moves every vehicle along a wandering heading for `elapsed`.
    pub fn step<R: Rng>(&self, rng: &mut R, elapsed: Duration) {
        let now = Utc::now();

        for mut position in self.positions.iter_mut() {
            let heading = (position.heading + rng.gen_range(-20.0..20.0)).rem_euclid(360.0);
            let speed = (position.speed_kph + rng.gen_range(-10.0..15.0)).clamp(0.0, MAX_SPEED_KPH);
            let metres = speed * 1000.0 / 3600.0 * elapsed.as_secs_f64();

            let radians = heading.to_radians();
            let lat_scale = position.latitude.to_radians().cos().max(0.01);

            position.latitude += metres * radians.cos() / METRES_PER_DEGREE;
            position.longitude += metres * radians.sin() / (METRES_PER_DEGREE * lat_scale);
            position.heading = heading;
            position.speed_kph = speed;
            position.updated_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    fn vehicles() -> Vec<Vehicle> {
        serde_json::from_value(json!([
            { "id": 1, "registration": "BB22 BBB", "status": "active", "site": 7 },
            { "id": 2, "registration": "AA11 AAA", "status": "maintenance" },
            { "id": 3, "registration": "CC33 CCC", "status": "sold" }
        ]))
        .unwrap()
    }

    fn sites() -> Vec<Site> {
        serde_json::from_value(json!([
            { "id": 7, "name": "Leeds", "latitude": 53.79, "longitude": -1.55 }
        ]))
        .unwrap()
    }

    #[test]
    fn test_seed_places_vehicles_near_their_site() {
        let board = TrackingBoard::new();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(board.seed(&vehicles(), &sites(), &mut rng), 2);
        assert_eq!(board.seed(&vehicles(), &sites(), &mut rng), 0);

        let snapshot = board.snapshot();
        assert_eq!(snapshot[0].registration, "AA11 AAA");
        assert!((snapshot[0].latitude - DEFAULT_ORIGIN.0).abs() < 0.05);
        assert!((snapshot[1].latitude - 53.79).abs() < 0.05);
    }

    #[test]
    fn test_step_moves_within_speed_limit() {
        let board = TrackingBoard::new();
        let mut rng = StdRng::seed_from_u64(11);
        board.seed(&vehicles(), &sites(), &mut rng);
        let before = board.snapshot();

        for _ in 0..10 {
            board.step(&mut rng, Duration::from_secs(5));
        }

        for (old, new) in before.iter().zip(board.snapshot()) {
            assert!(new.speed_kph >= 0.0 && new.speed_kph <= MAX_SPEED_KPH);
            assert!((0.0..360.0).contains(&new.heading));
            // 10 steps of 5s at 90 km/h is 1.25 km at most.
            assert!((new.latitude - old.latitude).abs() < 0.02);
        }
    }
}
