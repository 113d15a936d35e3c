pub mod grid;
pub mod render;
pub mod routes;
pub mod rota_dto;
pub mod rota_editor;
pub mod rota_handlers;
pub mod rota_models;
pub mod rota_repository;
pub mod rota_service;
pub mod week;

pub use rota_repository::RotaRepository;
pub use rota_service::RotaService;
