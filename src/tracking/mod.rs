pub mod routes;
pub mod tracking_board;
pub mod tracking_handlers;
pub mod tracking_models;
pub mod tracking_service;

pub use tracking_board::TrackingBoard;
pub use tracking_models::VehiclePosition;
pub use tracking_service::start_tracking_simulation;
