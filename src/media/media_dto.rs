use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where the API stored an uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaUpload {
    #[serde(alias = "image_url", alias = "file")]
    pub url: String,
}

/// Multipart form accepted by the upload endpoint. Only documents the body;
/// the handler reads the fields straight from the stream.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ImageUpload {
    /// The image file, up to 10 MB.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
