use crate::database::DbError;
use crate::database::photo::{Photo, PhotoWithOwner};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

const PHOTO_COLUMNS: &str = "id, album_id, title, description, file_name, file_path, \
                             size_bytes, acquisition_date, predominant_color, created_at";

/// Column values for a photo row about to be inserted.
#[derive(Debug)]
pub struct NewPhoto<'a> {
    pub id: &'a str,
    pub album_id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub file_name: &'a str,
    pub file_path: &'a str,
    pub size_bytes: i64,
    pub acquisition_date: DateTime<Utc>,
    pub predominant_color: Option<&'a str>,
}

pub struct PhotoStore;

impl PhotoStore {
    pub async fn insert(
        executor: impl Executor<'_, Database = Postgres>,
        photo: NewPhoto<'_>,
    ) -> Result<Photo, DbError> {
        Ok(sqlx::query_as::<_, Photo>(&format!(
            r"
            INSERT INTO photo
                (id, album_id, title, description, file_name, file_path,
                 size_bytes, acquisition_date, predominant_color)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PHOTO_COLUMNS}
            "
        ))
        .bind(photo.id)
        .bind(photo.album_id)
        .bind(photo.title)
        .bind(photo.description)
        .bind(photo.file_name)
        .bind(photo.file_path)
        .bind(photo.size_bytes)
        .bind(photo.acquisition_date)
        .bind(photo.predominant_color)
        .fetch_one(executor)
        .await?)
    }

    /// The most recently added photo of an album, used as the album cover in
    /// list views.
    pub async fn latest_for_album(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
    ) -> Result<Option<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photo WHERE album_id = $1 \
             ORDER BY created_at DESC LIMIT 1"
        ))
        .bind(album_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Fetches a photo joined with the owner of its containing album.
    pub async fn find_with_owner(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: &str,
    ) -> Result<Option<PhotoWithOwner>, DbError> {
        Ok(sqlx::query_as::<_, PhotoWithOwner>(
            r"
            SELECT p.id, p.album_id, p.file_name, a.owner_id
            FROM photo p
            JOIN album a ON a.id = p.album_id
            WHERE p.id = $1
            ",
        )
        .bind(photo_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM photo WHERE id = $1")
            .bind(photo_id)
            .execute(executor)
            .await?)
    }
}
