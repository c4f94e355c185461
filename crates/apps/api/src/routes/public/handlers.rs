//! Unauthenticated access to publicly shared albums.

use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::Json;
use common_services::api::album::error::AlbumError;
use common_services::api::album::interfaces::{PhotoSortParams, PublicAlbumResponse};
use common_services::api::album::service::get_public_album;
use tracing::instrument;

/// Fetches a shared album by its share token. Only albums currently marked
/// public resolve; a revoked token behaves like an unknown one.
#[utoipa::path(
    get,
    path = "/public/albums/{token}",
    tag = "Public",
    params(
        ("token" = String, Path, description = "Share token"),
        PhotoSortParams,
    ),
    responses(
        (status = 200, description = "The shared album", body = PublicAlbumResponse),
        (status = 404, description = "No public album with this token"),
    )
)]
#[instrument(skip(context, token), err(Debug))]
pub async fn shared_album(
    State(context): State<ApiContext>,
    Path(token): Path<String>,
    Query(params): Query<PhotoSortParams>,
) -> Result<Json<PublicAlbumResponse>, AlbumError> {
    let album = get_public_album(&context.pool, &token, params.sort).await?;
    Ok(Json(album))
}
