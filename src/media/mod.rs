pub mod media_dto;
pub mod media_handlers;
pub mod routes;

pub use media_dto::{ImageUpload, MediaUpload};
