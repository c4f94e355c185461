//! HTTP handlers for photo upload and deletion.

use crate::api_state::ApiContext;
use axum::extract::{Multipart, Path, State};
use axum::{Extension, Json, http::StatusCode};
use chrono::DateTime;
use common_services::api::photos::error::PhotosError;
use common_services::api::photos::interfaces::{UploadOptions, UploadedFile};
use common_services::api::photos::service::{add_photos, delete_photo};
use common_services::database::app_user::User;
use common_services::database::photo::Photo;
use tracing::instrument;

/// Uploads photos into an album via a multipart form. Files go in the
/// `files` field; `title`, `description`, `acquisitionDate` and
/// `predominantColor` are optional text fields applied to the whole batch.
#[utoipa::path(
    post,
    path = "/albums/{album_id}/photos",
    tag = "Photos",
    params(("album_id" = String, Path, description = "Album ID")),
    request_body(content = UploadOptions, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created photo rows", body = [Photo]),
        (status = 400, description = "No files, too many files, oversized or non-image file"),
        (status = 404, description = "Album not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, multipart), err(Debug))]
pub async fn upload(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(album_id): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<Photo>>), PhotosError> {
    let (files, options) = parse_upload_form(
        multipart,
        context.settings.upload.max_files_per_upload,
        context.settings.upload.max_file_size_bytes(),
    )
    .await?;

    let photos = add_photos(
        &context.pool,
        &context.storage,
        user.id,
        &album_id,
        files,
        options,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(photos)))
}

/// Deletes a photo the caller owns through its album.
#[utoipa::path(
    delete,
    path = "/photos/{photo_id}",
    tag = "Photos",
    params(("photo_id" = String, Path, description = "Photo ID")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 404, description = "Photo not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn remove(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<String>,
) -> Result<StatusCode, PhotosError> {
    delete_photo(&context.pool, &context.storage, user.id, &photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn parse_upload_form(
    mut multipart: Multipart,
    max_files: usize,
    max_file_size: usize,
) -> Result<(Vec<UploadedFile>, UploadOptions), PhotosError> {
    let mut files = Vec::new();
    let mut options = UploadOptions::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PhotosError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "files" => {
                if files.len() >= max_files {
                    return Err(PhotosError::BadRequest(format!(
                        "At most {max_files} files per upload."
                    )));
                }
                let file_name = field
                    .file_name()
                    .map_or_else(|| "upload".to_owned(), ToOwned::to_owned);
                let content_type = field
                    .content_type()
                    .map_or_else(|| "application/octet-stream".to_owned(), ToOwned::to_owned);
                if !content_type.starts_with("image/") {
                    return Err(PhotosError::BadRequest(format!(
                        "Only image uploads are accepted, got {content_type}."
                    )));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| PhotosError::BadRequest(format!("Failed to read file: {e}")))?;
                if bytes.len() > max_file_size {
                    return Err(PhotosError::BadRequest(format!(
                        "File {file_name} exceeds the maximum size of {max_file_size} bytes."
                    )));
                }
                files.push(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "title" => options.title = Some(read_text_field(field).await?),
            "description" => options.description = Some(read_text_field(field).await?),
            "acquisitionDate" => {
                let raw = read_text_field(field).await?;
                let parsed = DateTime::parse_from_rfc3339(&raw).map_err(|_| {
                    PhotosError::BadRequest(format!(
                        "acquisitionDate must be an RFC 3339 timestamp, got {raw:?}."
                    ))
                })?;
                options.acquisition_date = Some(parsed.to_utc());
            }
            "predominantColor" => options.predominant_color = Some(read_text_field(field).await?),
            other => {
                return Err(PhotosError::BadRequest(format!(
                    "Unexpected form field {other:?}."
                )));
            }
        }
    }

    Ok((files, options))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, PhotosError> {
    field
        .text()
        .await
        .map_err(|e| PhotosError::BadRequest(format!("Invalid form field: {e}")))
}
