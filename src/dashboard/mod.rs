pub mod dashboard_dto;
pub mod dashboard_handlers;
pub mod routes;

pub use dashboard_dto::DashboardSummary;
