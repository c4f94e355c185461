use crate::api::album::interfaces::SortOrder;
use crate::database::DbError;
use crate::database::album::{Album, AlbumWithCount};
use crate::database::photo::Photo;
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

const ALBUM_COLUMNS: &str =
    "id, owner_id, title, description, is_public, share_token, created_at, updated_at";

pub struct AlbumStore;

impl AlbumStore {
    /// Creates a new album owned by the given user.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        owner_id: i32,
        title: &str,
        description: &str,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(&format!(
            r"
            INSERT INTO album (id, owner_id, title, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {ALBUM_COLUMNS}
            "
        ))
        .bind(album_id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_one(executor)
        .await?)
    }

    /// Updates an album's title and description.
    pub async fn update(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        title: &str,
        description: &str,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(&format!(
            r"
            UPDATE album
            SET title = $1, description = $2, updated_at = now()
            WHERE id = $3
            RETURNING {ALBUM_COLUMNS}
            "
        ))
        .bind(title)
        .bind(description)
        .bind(album_id)
        .fetch_one(executor)
        .await?)
    }

    /// Retrieves an album only if the given user owns it. Ownership checks
    /// deliberately collapse into "not found" at the API layer.
    pub async fn find_by_id_for_owner(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        owner_id: i32,
    ) -> Result<Option<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>(&format!(
            "SELECT {ALBUM_COLUMNS} FROM album WHERE id = $1 AND owner_id = $2"
        ))
        .bind(album_id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Retrieves all albums owned by a user with their photo counts, most
    /// recently updated first.
    pub async fn list_with_count_by_owner(
        executor: impl Executor<'_, Database = Postgres>,
        owner_id: i32,
    ) -> Result<Vec<AlbumWithCount>, DbError> {
        Ok(sqlx::query_as::<_, AlbumWithCount>(
            r"
            SELECT
                a.id,
                a.owner_id,
                a.title,
                a.description,
                a.is_public,
                a.share_token,
                a.created_at,
                a.updated_at,
                COUNT(p.id) AS photo_count
            FROM album a
            LEFT JOIN photo p ON p.album_id = a.id
            WHERE a.owner_id = $1
            GROUP BY a.id
            ORDER BY a.updated_at DESC
            ",
        )
        .bind(owner_id)
        .fetch_all(executor)
        .await?)
    }

    /// Number of photos currently in the album. Guards album deletion.
    pub async fn photo_count(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM photo WHERE album_id = $1")
                .bind(album_id)
                .fetch_one(executor)
                .await?,
        )
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM album WHERE id = $1")
            .bind(album_id)
            .execute(executor)
            .await?)
    }

    /// Sets the sharing state. The check constraint on the table enforces
    /// that a token is present exactly when the album is public.
    pub async fn set_share_state(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        is_public: bool,
        share_token: Option<&str>,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(&format!(
            r"
            UPDATE album
            SET is_public = $1, share_token = $2, updated_at = now()
            WHERE id = $3
            RETURNING {ALBUM_COLUMNS}
            "
        ))
        .bind(is_public)
        .bind(share_token)
        .bind(album_id)
        .fetch_one(executor)
        .await?)
    }

    /// Looks up a publicly shared album by its share token. Albums that have
    /// been unshared never match, even if a stale token is presented.
    pub async fn find_public_by_token(
        executor: impl Executor<'_, Database = Postgres>,
        token: &str,
    ) -> Result<Option<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>(&format!(
            "SELECT {ALBUM_COLUMNS} FROM album WHERE share_token = $1 AND is_public = TRUE"
        ))
        .bind(token)
        .fetch_optional(executor)
        .await?)
    }

    /// Retrieves the photos of an album ordered by acquisition date.
    pub async fn list_photos(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        order: SortOrder,
    ) -> Result<Vec<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(&format!(
            r"
            SELECT id, album_id, title, description, file_name, file_path,
                   size_bytes, acquisition_date, predominant_color, created_at
            FROM photo
            WHERE album_id = $1
            ORDER BY acquisition_date {}
            ",
            order.as_sql()
        ))
        .bind(album_id)
        .fetch_all(executor)
        .await?)
    }
}
