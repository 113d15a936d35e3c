pub mod auth_dto;
pub mod auth_handlers;
pub mod auth_repository;
pub mod cookies;
pub mod jwt;
pub mod routes;

pub use auth_repository::AuthRepository;
pub use jwt::{inspect_token, TokenInfo, TokenStatus};
