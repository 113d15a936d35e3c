pub mod routes;
pub mod site_dto;
pub mod site_handlers;
pub mod site_models;
pub mod site_repository;

pub use site_models::Site;
pub use site_repository::SiteRepository;
