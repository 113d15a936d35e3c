pub mod audit_dto;
pub mod audit_handlers;
pub mod audit_models;
pub mod audit_repository;
pub mod routes;

pub use audit_models::{AuditExpirySettings, ExpiryBadge, ExpiryStatus};
pub use audit_repository::AuditRepository;
