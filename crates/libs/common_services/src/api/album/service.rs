use crate::api::album::error::AlbumError;
use crate::api::album::interfaces::{
    AlbumDetailsResponse, AlbumSummary, OwnerSummary, PublicAlbumResponse, ShareResponse,
    SortOrder,
};
use crate::database::album::Album;
use crate::database::{AlbumStore, PhotoStore, UserStore};
use crate::utils::{hex_token, nice_id};
use app_state::constants;
use sqlx::PgPool;
use tracing::{info, instrument};

/// Fetches an album owned by the given user, or reports "not found". A
/// requester who does not own the album cannot distinguish it from a missing
/// one.
async fn owned_album(pool: &PgPool, album_id: &str, user_id: i32) -> Result<Album, AlbumError> {
    AlbumStore::find_by_id_for_owner(pool, album_id, user_id)
        .await?
        .ok_or_else(|| AlbumError::NotFound(album_id.to_owned()))
}

/// Lists the caller's albums, most recently updated first, each with its
/// photo count and cover photo.
#[instrument(skip(pool))]
pub async fn list_albums(pool: &PgPool, user_id: i32) -> Result<Vec<AlbumSummary>, AlbumError> {
    let rows = AlbumStore::list_with_count_by_owner(pool, user_id).await?;

    let mut summaries = Vec::with_capacity(rows.len());
    for row in rows {
        let cover = if row.photo_count > 0 {
            PhotoStore::latest_for_album(pool, &row.id).await?
        } else {
            None
        };
        summaries.push(AlbumSummary {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            is_public: row.is_public,
            share_token: row.share_token,
            created_at: row.created_at,
            updated_at: row.updated_at,
            photo_count: row.photo_count,
            cover,
        });
    }
    Ok(summaries)
}

/// Fetches a single album with its photos sorted by acquisition date.
#[instrument(skip(pool))]
pub async fn get_album(
    pool: &PgPool,
    album_id: &str,
    user_id: i32,
    sort: SortOrder,
) -> Result<AlbumDetailsResponse, AlbumError> {
    let album = owned_album(pool, album_id, user_id).await?;
    let photos = AlbumStore::list_photos(pool, album_id, sort).await?;
    Ok(AlbumDetailsResponse { album, photos })
}

#[instrument(skip(pool))]
pub async fn create_album(
    pool: &PgPool,
    user_id: i32,
    title: &str,
    description: &str,
) -> Result<Album, AlbumError> {
    validate_album_input(title, description)?;
    let album_id = nice_id(constants().database.album_id_length);
    let album = AlbumStore::create(pool, &album_id, user_id, title, description).await?;
    Ok(album)
}

#[instrument(skip(pool))]
pub async fn update_album(
    pool: &PgPool,
    album_id: &str,
    user_id: i32,
    title: &str,
    description: &str,
) -> Result<Album, AlbumError> {
    validate_album_input(title, description)?;
    owned_album(pool, album_id, user_id).await?;
    Ok(AlbumStore::update(pool, album_id, title, description).await?)
}

/// Deletes an album. Refused while the album still contains photos.
#[instrument(skip(pool))]
pub async fn delete_album(pool: &PgPool, album_id: &str, user_id: i32) -> Result<(), AlbumError> {
    owned_album(pool, album_id, user_id).await?;

    let photo_count = AlbumStore::photo_count(pool, album_id).await?;
    if photo_count > 0 {
        return Err(AlbumError::BadRequest(
            "Cannot delete an album that still contains photos.".to_owned(),
        ));
    }

    AlbumStore::delete(pool, album_id).await?;
    Ok(())
}

/// Toggles the public sharing state of an album. Enabling issues a share
/// token (reusing a previously issued one if the row still carries it);
/// disabling clears the token.
#[instrument(skip(pool, public_url))]
pub async fn toggle_share(
    pool: &PgPool,
    public_url: &str,
    album_id: &str,
    user_id: i32,
) -> Result<ShareResponse, AlbumError> {
    let album = owned_album(pool, album_id, user_id).await?;

    let is_public = !album.is_public;
    let share_token = if is_public {
        Some(
            album
                .share_token
                .unwrap_or_else(|| hex_token(constants().database.share_token_bytes)),
        )
    } else {
        None
    };

    let updated =
        AlbumStore::set_share_state(pool, album_id, is_public, share_token.as_deref()).await?;
    info!(
        "Album {} sharing toggled to is_public={}",
        album_id, updated.is_public
    );

    let share_url = updated
        .share_token
        .as_ref()
        .map(|token| format!("{}/api/public/albums/{token}", public_url.trim_end_matches('/')));

    Ok(ShareResponse {
        is_public: updated.is_public,
        share_token: updated.share_token,
        share_url,
    })
}

/// Fetches a publicly shared album by its share token, with photos sorted
/// and the owner's display details. No authentication involved.
#[instrument(skip(pool))]
pub async fn get_public_album(
    pool: &PgPool,
    token: &str,
    sort: SortOrder,
) -> Result<PublicAlbumResponse, AlbumError> {
    let album = AlbumStore::find_public_by_token(pool, token)
        .await?
        .ok_or_else(|| AlbumError::NotFound("album is not public".to_owned()))?;

    let photos = AlbumStore::list_photos(pool, &album.id, sort).await?;
    let owner = UserStore::find_by_id(pool, album.owner_id)
        .await?
        .ok_or_else(|| AlbumError::NotFound("album owner no longer exists".to_owned()))?;

    Ok(PublicAlbumResponse {
        album,
        photos,
        owner: OwnerSummary {
            name: owner.name,
            email: owner.email,
        },
    })
}

fn validate_album_input(title: &str, description: &str) -> Result<(), AlbumError> {
    if title.trim().is_empty() {
        return Err(AlbumError::BadRequest("Title is required.".to_owned()));
    }
    if description.trim().is_empty() {
        return Err(AlbumError::BadRequest(
            "Description is required.".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_album_input;

    #[test]
    fn blank_title_or_description_is_rejected() {
        assert!(validate_album_input("", "desc").is_err());
        assert!(validate_album_input("  ", "desc").is_err());
        assert!(validate_album_input("title", "").is_err());
        assert!(validate_album_input("title", "desc").is_ok());
    }
}
