pub mod routes;
pub mod walkaround_dto;
pub mod walkaround_handlers;
pub mod walkaround_models;
pub mod walkaround_repository;

pub use walkaround_models::{Walkaround, WalkaroundStatus};
pub use walkaround_repository::WalkaroundRepository;
