//! HTTP handlers for album management.

use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::{Extension, Json, http::StatusCode};
use common_services::api::album::error::AlbumError;
use common_services::api::album::interfaces::{
    AlbumDetailsResponse, AlbumSummary, CreateAlbumRequest, PhotoSortParams, ShareResponse,
    UpdateAlbumRequest,
};
use common_services::api::album::service::{
    create_album, delete_album, get_album, list_albums, toggle_share, update_album,
};
use common_services::database::album::Album;
use common_services::database::app_user::User;
use tracing::instrument;

/// Lists the caller's albums, most recently updated first.
#[utoipa::path(
    get,
    path = "/albums",
    tag = "Albums",
    responses(
        (status = 200, description = "The caller's albums", body = [AlbumSummary]),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn list(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<AlbumSummary>>, AlbumError> {
    let albums = list_albums(&context.pool, user.id).await?;
    Ok(Json(albums))
}

/// Creates a new album for the caller.
#[utoipa::path(
    post,
    path = "/albums",
    tag = "Albums",
    request_body = CreateAlbumRequest,
    responses(
        (status = 201, description = "Album created", body = Album),
        (status = 400, description = "Missing title or description"),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), err(Debug))]
pub async fn create(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateAlbumRequest>,
) -> Result<(StatusCode, Json<Album>), AlbumError> {
    let album = create_album(&context.pool, user.id, &payload.title, &payload.description).await?;
    Ok((StatusCode::CREATED, Json(album)))
}

/// Fetches one of the caller's albums with its photos.
#[utoipa::path(
    get,
    path = "/albums/{album_id}",
    tag = "Albums",
    params(
        ("album_id" = String, Path, description = "Album ID"),
        PhotoSortParams,
    ),
    responses(
        (status = 200, description = "Album with photos", body = AlbumDetailsResponse),
        (status = 404, description = "Album not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn details(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(album_id): Path<String>,
    Query(params): Query<PhotoSortParams>,
) -> Result<Json<AlbumDetailsResponse>, AlbumError> {
    let album = get_album(&context.pool, &album_id, user.id, params.sort).await?;
    Ok(Json(album))
}

/// Updates an album's title and description.
#[utoipa::path(
    put,
    path = "/albums/{album_id}",
    tag = "Albums",
    request_body = UpdateAlbumRequest,
    params(("album_id" = String, Path, description = "Album ID")),
    responses(
        (status = 200, description = "Updated album", body = Album),
        (status = 400, description = "Missing title or description"),
        (status = 404, description = "Album not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), err(Debug))]
pub async fn update(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(album_id): Path<String>,
    Json(payload): Json<UpdateAlbumRequest>,
) -> Result<Json<Album>, AlbumError> {
    let album = update_album(
        &context.pool,
        &album_id,
        user.id,
        &payload.title,
        &payload.description,
    )
    .await?;
    Ok(Json(album))
}

/// Deletes an empty album. Albums that still contain photos are refused.
#[utoipa::path(
    delete,
    path = "/albums/{album_id}",
    tag = "Albums",
    params(("album_id" = String, Path, description = "Album ID")),
    responses(
        (status = 204, description = "Album deleted"),
        (status = 400, description = "Album still contains photos"),
        (status = 404, description = "Album not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn remove(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(album_id): Path<String>,
) -> Result<StatusCode, AlbumError> {
    delete_album(&context.pool, &album_id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggles public sharing of an album.
#[utoipa::path(
    post,
    path = "/albums/{album_id}/share",
    tag = "Albums",
    params(("album_id" = String, Path, description = "Album ID")),
    responses(
        (status = 200, description = "New sharing state", body = ShareResponse),
        (status = 404, description = "Album not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn share(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(album_id): Path<String>,
) -> Result<Json<ShareResponse>, AlbumError> {
    let response = toggle_share(
        &context.pool,
        &context.settings.api.public_url,
        &album_id,
        user.id,
    )
    .await?;
    Ok(Json(response))
}
