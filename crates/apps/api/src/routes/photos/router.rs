use crate::api_state::ApiContext;
use crate::routes::photos::handlers;
use app_state::UploadSettings;
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{delete, post},
};

pub fn photos_protected_router(upload: &UploadSettings) -> Router<ApiContext> {
    // Leave headroom for multipart framing and the text fields on top of
    // the per-file size cap.
    let body_limit =
        upload.max_file_size_bytes() * upload.max_files_per_upload + 1024 * 1024;

    Router::new()
        .route("/albums/{album_id}/photos", post(handlers::upload))
        .route("/photos/{photo_id}", delete(handlers::remove))
        .layer(DefaultBodyLimit::max(body_limit))
}
