pub mod routes;
pub mod vehicle_dto;
pub mod vehicle_handlers;
pub mod vehicle_models;
pub mod vehicle_repository;

pub use vehicle_dto::VehicleView;
pub use vehicle_models::{Vehicle, VehicleStatus};
pub use vehicle_repository::VehicleRepository;
