use axum::{
    extract::{Multipart, State},
    Json,
};
use reqwest::multipart::{Form, Part};

use super::media_dto::MediaUpload;
use crate::{
    error::{AppError, Result},
    middleware::Session,
    state::AppState,
};

pub const IMAGE_FIELD: &str = "image";
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Upload an image (vehicle photo, defect evidence)
#[utoipa::path(
    post,
    path = "/dashboard/media/upload",
    request_body(content = ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored image", body = MediaUpload),
        (status = 400, description = "Missing or non-image file")
    ),
    tag = "media"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<Json<MediaUpload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(AppError::BadRequest(
                "Only image files can be uploaded".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if data.is_empty() {
            return Err(AppError::BadRequest("The image is empty".to_string()));
        }

        tracing::debug!("Uploading {} ({} bytes)", file_name, data.len());

        let part = Part::bytes(data.to_vec())
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let upload = state
            .api
            .upload("/media/upload_image/", Some(session.token()), form)
            .await?;
        return Ok(Json(upload));
    }

    Err(AppError::BadRequest(format!(
        "Missing '{}' file field",
        IMAGE_FIELD
    )))
}
