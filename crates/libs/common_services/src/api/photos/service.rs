use crate::api::photos::color::{normalize_color, predominant_color};
use crate::api::photos::error::PhotosError;
use crate::api::photos::exif_date::acquisition_date_from_exif;
use crate::api::photos::interfaces::{UploadOptions, UploadedFile};
use crate::database::photo::Photo;
use crate::database::{AlbumStore, PhotoStore, photo_store::NewPhoto};
use crate::storage_client::StorageClient;
use crate::utils::nice_id;
use app_state::constants;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::path::Path;
use tracing::{info, instrument};

/// Adds uploaded photos to an album the user owns.
///
/// For each file the acquisition date and predominant color are resolved,
/// the bytes are written to object storage, and only then is the metadata
/// row inserted. A storage object orphaned by a failed insert is not
/// cleaned up.
#[instrument(skip(pool, storage, files, options), fields(n_files = files.len()))]
pub async fn add_photos(
    pool: &PgPool,
    storage: &StorageClient,
    user_id: i32,
    album_id: &str,
    files: Vec<UploadedFile>,
    options: UploadOptions,
) -> Result<Vec<Photo>, PhotosError> {
    AlbumStore::find_by_id_for_owner(pool, album_id, user_id)
        .await?
        .ok_or_else(|| PhotosError::NotFound(format!("album {album_id}")))?;

    if files.is_empty() {
        return Err(PhotosError::BadRequest(
            "Upload at least one photo.".to_owned(),
        ));
    }

    let mut created = Vec::with_capacity(files.len());
    for file in files {
        let photo = store_one_photo(pool, storage, album_id, file, &options).await?;
        created.push(photo);
    }
    Ok(created)
}

async fn store_one_photo(
    pool: &PgPool,
    storage: &StorageClient,
    album_id: &str,
    file: UploadedFile,
    options: &UploadOptions,
) -> Result<Photo, PhotosError> {
    let acquisition_date = resolve_acquisition_date(
        options.acquisition_date,
        acquisition_date_from_exif(&file.bytes),
        Utc::now(),
    );

    let color = options
        .predominant_color
        .as_deref()
        .and_then(normalize_color)
        .or_else(|| predominant_color(&file.bytes));

    let title = options
        .title
        .clone()
        .unwrap_or_else(|| file_stem(&file.file_name));

    let object_name = object_name(&file.file_name, Utc::now());
    let size_bytes = file.bytes.len() as i64;
    storage
        .upload(&object_name, file.bytes, &file.content_type)
        .await?;
    let file_path = storage.public_url(&object_name)?;

    let photo = PhotoStore::insert(
        pool,
        NewPhoto {
            id: &nice_id(constants().database.photo_id_length),
            album_id,
            title: &title,
            description: options.description.as_deref(),
            file_name: &object_name,
            file_path: &file_path,
            size_bytes,
            acquisition_date,
            predominant_color: color.as_deref(),
        },
    )
    .await?;

    info!("Stored photo {} in album {}", photo.id, album_id);
    Ok(photo)
}

/// Deletes a photo owned (via its album) by the user. The database row goes
/// first; removing the stored object is best-effort.
#[instrument(skip(pool, storage))]
pub async fn delete_photo(
    pool: &PgPool,
    storage: &StorageClient,
    user_id: i32,
    photo_id: &str,
) -> Result<(), PhotosError> {
    let photo = PhotoStore::find_with_owner(pool, photo_id)
        .await?
        .filter(|p| p.owner_id == user_id)
        .ok_or_else(|| PhotosError::NotFound(photo_id.to_owned()))?;

    PhotoStore::delete(pool, photo_id).await?;
    storage.remove_best_effort(&photo.file_name).await;
    Ok(())
}

/// Acquisition date fallback chain: explicit input, then EXIF, then now.
fn resolve_acquisition_date(
    explicit: Option<DateTime<Utc>>,
    from_exif: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    explicit.or(from_exif).unwrap_or(now)
}

/// The object key under which an upload is stored: upload time in millis
/// plus the sanitized original file name.
fn object_name(original: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", now.timestamp_millis(), sanitize_file_name(original))
}

/// Keeps only the final path component and replaces anything outside
/// `[A-Za-z0-9._-]` so the name is safe as an object key.
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map_or_else(|| file_name.to_owned(), |s| s.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(s: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(s, 0).single().expect("valid timestamp")
    }

    #[test]
    fn explicit_date_wins_over_exif_and_now() {
        let resolved = resolve_acquisition_date(Some(ts(100)), Some(ts(200)), ts(300));
        assert_eq!(resolved, ts(100));
    }

    #[test]
    fn exif_date_wins_over_now() {
        let resolved = resolve_acquisition_date(None, Some(ts(200)), ts(300));
        assert_eq!(resolved, ts(200));
    }

    #[test]
    fn upload_time_is_the_last_resort() {
        let resolved = resolve_acquisition_date(None, None, ts(300));
        assert_eq!(resolved, ts(300));
    }

    #[test]
    fn object_names_are_prefixed_and_sanitized() {
        let name = object_name("my photo (1).jpg", ts(1_700_000_000));
        assert_eq!(name, "1700000000000-my_photo__1_.jpg");
    }

    #[test]
    fn sanitizing_strips_directory_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(r"C:\pics\summer.jpg"), "summer.jpg");
    }

    #[test]
    fn title_defaults_to_the_file_stem() {
        assert_eq!(file_stem("sunset.jpg"), "sunset");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
    }
}
